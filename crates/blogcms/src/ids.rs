//! Identifier generation for posts and categories.

use chrono::Utc;
use std::cell::Cell;
use uuid::Uuid;

pub trait IdSource {
    fn next_id(&self) -> String;
}

/// Base36 milliseconds followed by a base36 random suffix. Sorts roughly by
/// creation time and is unique enough for one writer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeRandomIds;

impl IdSource for TimeRandomIds {
    fn next_id(&self) -> String {
        let millis = Utc::now().timestamp_millis().max(0) as u128;
        // 52 random bits keep the suffix at ten or eleven base36 digits.
        let random = Uuid::new_v4().as_u128() & ((1u128 << 52) - 1);
        format!("{}{}", to_base36(millis), to_base36(random))
    }
}

/// Deterministic ids (`id-1`, `id-2`, ...) for tests and fixtures.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: Cell<u64>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.get() + 1;
        self.next.set(n);
        format!("id-{}", n)
    }
}

pub fn to_base36(mut n: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8_lossy(&buf).into_owned()
}
