//! # Command Dispatch
//!
//! `run()` parses arguments, sets up logging and the store, and hands each
//! subcommand to a `handle_*` function. Handlers call [`BlogApi`], render what
//! comes back and turn the [`CmdResult`] into an exit code: any error-level message
//! means a non-zero exit.
//!
//! Nothing here decides business rules. Filters, validation and messages all come
//! from the library; handlers only translate flags into forms and queries.

use super::render::Renderer;
use super::setup::{
    CategoryCommands, Cli, Commands, ListArgs, PostFields, SettingsCommands, StatusArg,
};
use super::styles::theme_for;
use crate::logging::init_logging;
use anyhow::{bail, Context, Result};
use blogcms::api::BlogApi;
use blogcms::commands::{CmdMessage, CmdResult};
use blogcms::init::{load_config, open};
use blogcms::model::SettingsPatch;
use blogcms::query::PostQuery;
use blogcms::store::FsBackend;
use blogcms::validation::{CategoryForm, PostForm};
use blogcms::view::{
    category_cards, pagination_bar, post_cards, post_detail, post_rows, UiAction,
};
use clap::Parser;
use console::Term;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

const CLEAR_PROMPT: &str = "Are you sure you want to clear all data? This action cannot be undone.";

struct AppContext {
    api: BlogApi<FsBackend>,
    out: Renderer,
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = load_config(cli.data.as_deref());
    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    init_logging(level)?;

    let mut ctx = init_context(&cli, config);

    match cli.command {
        Some(Commands::List(args)) => handle_list(&mut ctx, args),
        Some(Commands::View { id }) => handle_view(&mut ctx, &id),
        Some(Commands::Create { title, fields }) => handle_create(&mut ctx, title, fields),
        Some(Commands::Edit { id, title, fields }) => handle_edit(&mut ctx, &id, title, fields),
        Some(Commands::Delete { ids, yes }) => handle_delete(&mut ctx, ids, yes),
        Some(Commands::Manage { search, status }) => handle_manage(&mut ctx, search, status),
        Some(Commands::Category(cmd)) => match cmd {
            CategoryCommands::List => handle_category_list(&mut ctx),
            CategoryCommands::Add {
                name,
                description,
                color,
            } => handle_category_add(&mut ctx, name, description, color),
            CategoryCommands::Edit {
                id,
                name,
                description,
                color,
            } => handle_category_edit(&mut ctx, &id, name, description, color),
            CategoryCommands::Delete { id, yes } => handle_category_delete(&mut ctx, id, yes),
        },
        Some(Commands::Stats) => handle_stats(&mut ctx),
        Some(Commands::Settings(cmd)) => match cmd {
            SettingsCommands::Show => handle_settings_show(&mut ctx),
            SettingsCommands::Set { key, value } => handle_settings_set(&mut ctx, &key, &value),
        },
        Some(Commands::Export { output }) => handle_export(&mut ctx, output),
        Some(Commands::Import { path }) => handle_import(&mut ctx, path),
        Some(Commands::Clear { yes }) => handle_clear(&mut ctx, yes),
        None => handle_list(&mut ctx, ListArgs::default()),
    }
}

fn init_context(cli: &Cli, config: blogcms::config::BlogConfig) -> AppContext {
    let blog = open(config, cli.data.clone());
    debug!(data_dir = %blog.data_dir.display(), "context ready");

    let theme = theme_for(blog.api.settings().theme);
    let use_color = !cli.no_color && Term::stdout().features().colors_supported();

    AppContext {
        api: blog.api,
        out: Renderer::new(theme, use_color),
    }
}

fn handle_list(ctx: &mut AppContext, args: ListArgs) -> Result<ExitCode> {
    let category = args
        .category
        .as_deref()
        .map(|key| resolve_category(&ctx.api, key))
        .transpose()?;

    let state = ctx.api.state_mut();
    state.set_query(PostQuery {
        search: args.search.unwrap_or_default(),
        category,
        status: args.status.map(Into::into),
        tag: args.tag,
        sort: args.sort.into(),
    });
    state.go_to_page(args.page);

    let result = ctx.api.list_posts(args.limit);
    let cards = post_cards(
        &result.listed_posts,
        &result.listed_categories,
        ctx.api.store().now(),
    );
    if let Some(pagination) = &result.pagination {
        emit(&ctx.out.post_list(&cards, &pagination_bar(pagination)));
    }
    Ok(finish(ctx, &result))
}

fn handle_view(ctx: &mut AppContext, id: &str) -> Result<ExitCode> {
    let result = ctx.api.get_post(id);
    if let Some(post) = result.listed_posts.first() {
        emit(&ctx.out.post_detail(&post_detail(post, &result.listed_categories)));
    }
    Ok(finish(ctx, &result))
}

fn handle_create(ctx: &mut AppContext, title: String, fields: PostFields) -> Result<ExitCode> {
    let mut form = ctx.api.new_post_form();
    form.title = title;
    let read_stdin = fields.content.is_none();
    apply_post_fields(&ctx.api, &mut form, fields)?;
    if read_stdin {
        form.content = read_piped_stdin()?;
    }

    let mut result = ctx.api.create_post(form);
    if let Some(post) = result.affected_posts.first() {
        let id = post.id.clone();
        result.add_message(CmdMessage::info(format!("id: {}", id)));
    }
    Ok(finish(ctx, &result))
}

fn handle_edit(
    ctx: &mut AppContext,
    id: &str,
    title: Option<String>,
    fields: PostFields,
) -> Result<ExitCode> {
    // An unknown id yields the library's "not found" result.
    let mut form = ctx.api.edit_post_form(id).unwrap_or_default();
    if let Some(title) = title {
        form.title = title;
    }
    apply_post_fields(&ctx.api, &mut form, fields)?;

    let result = ctx.api.update_post(id, form);
    Ok(finish(ctx, &result))
}

fn handle_delete(ctx: &mut AppContext, ids: Vec<String>, yes: bool) -> Result<ExitCode> {
    let result = if let [id] = ids.as_slice() {
        let action = UiAction::DeletePost { id: id.clone() };
        if !confirm(action.confirmation().unwrap_or_default(), yes)? {
            return Ok(cancelled());
        }
        ctx.api.dispatch(&action)
    } else {
        let prompt = format!("Are you sure you want to delete {} posts?", ids.len());
        if !confirm(&prompt, yes)? {
            return Ok(cancelled());
        }
        ctx.api.delete_posts(&ids)
    };
    Ok(finish(ctx, &result))
}

fn handle_manage(
    ctx: &mut AppContext,
    search: Option<String>,
    status: Option<StatusArg>,
) -> Result<ExitCode> {
    ctx.api
        .state_mut()
        .set_manage_filters(search.unwrap_or_default(), status.map(Into::into));
    let result = ctx.api.manage_posts();
    let rows = post_rows(
        &result.listed_posts,
        &result.listed_categories,
        ctx.api.store().now(),
    );
    emit(&ctx.out.manage(&rows));
    Ok(finish(ctx, &result))
}

fn handle_category_list(ctx: &mut AppContext) -> Result<ExitCode> {
    let result = ctx.api.list_categories();
    let cards = category_cards(&result.listed_categories, &result.listed_posts);
    emit(&ctx.out.categories(&cards));
    Ok(finish(ctx, &result))
}

fn handle_category_add(
    ctx: &mut AppContext,
    name: String,
    description: Option<String>,
    color: Option<String>,
) -> Result<ExitCode> {
    let form = CategoryForm {
        name,
        description: description.unwrap_or_default(),
        color: color.unwrap_or_default(),
    };
    let mut result = ctx.api.create_category(form);
    if let Some(category) = result.affected_categories.first() {
        let id = category.id.clone();
        result.add_message(CmdMessage::info(format!("id: {}", id)));
    }
    Ok(finish(ctx, &result))
}

fn handle_category_edit(
    ctx: &mut AppContext,
    id: &str,
    name: Option<String>,
    description: Option<String>,
    color: Option<String>,
) -> Result<ExitCode> {
    let mut form = ctx.api.edit_category_form(id).unwrap_or_default();
    if let Some(name) = name {
        form.name = name;
    }
    if let Some(description) = description {
        form.description = description;
    }
    if let Some(color) = color {
        form.color = color;
    }
    let result = ctx.api.update_category(id, form);
    Ok(finish(ctx, &result))
}

fn handle_category_delete(ctx: &mut AppContext, id: String, yes: bool) -> Result<ExitCode> {
    let action = UiAction::DeleteCategory { id };
    if !confirm(action.confirmation().unwrap_or_default(), yes)? {
        return Ok(cancelled());
    }
    let result = ctx.api.dispatch(&action);
    Ok(finish(ctx, &result))
}

fn handle_stats(ctx: &mut AppContext) -> Result<ExitCode> {
    emit(&ctx.out.stats(&ctx.api.stats()));
    Ok(ExitCode::SUCCESS)
}

fn handle_settings_show(ctx: &mut AppContext) -> Result<ExitCode> {
    emit(&ctx.out.settings(&ctx.api.settings()));
    Ok(ExitCode::SUCCESS)
}

fn handle_settings_set(ctx: &mut AppContext, key: &str, value: &str) -> Result<ExitCode> {
    let patch = SettingsPatch::from_pair(key, value).map_err(anyhow::Error::msg)?;
    let result = ctx.api.update_settings(&patch);
    if !result.has_errors() {
        emit(&ctx.out.settings(&ctx.api.settings()));
    }
    Ok(finish(ctx, &result))
}

fn handle_export(ctx: &mut AppContext, output: Option<PathBuf>) -> Result<ExitCode> {
    let json = ctx.api.export()?;
    match output {
        Some(path) => {
            std::fs::write(&path, &json)
                .with_context(|| format!("could not write {}", path.display()))?;
            let result = CmdResult::default().with_message(CmdMessage::success(format!(
                "Data exported to {}",
                path.display()
            )));
            Ok(finish(ctx, &result))
        }
        None => {
            println!("{}", json);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn handle_import(ctx: &mut AppContext, path: PathBuf) -> Result<ExitCode> {
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("could not read {}", path.display()))?;
    let result = ctx.api.import(&raw);
    Ok(finish(ctx, &result))
}

fn handle_clear(ctx: &mut AppContext, yes: bool) -> Result<ExitCode> {
    if !confirm(CLEAR_PROMPT, yes)? {
        return Ok(cancelled());
    }
    let result = ctx.api.clear();
    Ok(finish(ctx, &result))
}

/// Copies set flags into the form. Categories may be given by id or name; an
/// empty value clears the category.
fn apply_post_fields(
    api: &BlogApi<FsBackend>,
    form: &mut PostForm,
    fields: PostFields,
) -> Result<()> {
    if let Some(slug) = fields.slug {
        form.slug = slug;
    }
    if let Some(category) = fields.category {
        form.category_id = if category.trim().is_empty() {
            String::new()
        } else {
            resolve_category(api, &category)?
        };
    }
    if let Some(status) = fields.status {
        form.status = status.into();
    }
    if let Some(excerpt) = fields.excerpt {
        form.excerpt = excerpt;
    }
    if let Some(content) = fields.content {
        form.content = content;
    }
    if let Some(tags) = fields.tags {
        form.tags = tags;
    }
    Ok(())
}

/// Category id for an id or a (case-insensitive) name.
fn resolve_category(api: &BlogApi<FsBackend>, key: &str) -> Result<String> {
    let key = key.trim();
    let categories = api.store().categories();
    categories
        .iter()
        .find(|c| c.id == key)
        .or_else(|| categories.iter().find(|c| c.name.eq_ignore_ascii_case(key)))
        .map(|c| c.id.clone())
        .with_context(|| format!("Category not found: {}", key))
}

fn read_piped_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut content = String::new();
    stdin
        .read_to_string(&mut content)
        .context("could not read content from stdin")?;
    Ok(content)
}

/// Asks on the terminal unless `yes` is set. Without a terminal to ask on, the
/// caller must pass `--yes`.
fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    let term = Term::stderr();
    if !term.is_term() {
        bail!("{} Re-run with --yes to confirm.", prompt);
    }
    term.write_str(&format!("{} [y/N] ", prompt))?;
    let answer = term.read_line()?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn cancelled() -> ExitCode {
    println!("Cancelled.");
    ExitCode::SUCCESS
}

fn finish(ctx: &AppContext, result: &CmdResult) -> ExitCode {
    emit(&ctx.out.messages(&result.messages, result.validation.as_ref()));
    if result.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn emit(output: &str) {
    if output.is_empty() {
        return;
    }
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}
