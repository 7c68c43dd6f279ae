use axum::{
    extract::{Extension, Form, Path, State},
    response::{Html, IntoResponse, Response, Redirect},
};
use html_escape::encode_text;

use crate::auth::Identity;
use crate::errors::{AppError, AppResult, RepositoryError};
use crate::models::{Sheet, SheetForm};
use crate::pages::{self, Page};
use crate::parser::build_sheet;
use crate::state::AppState;

fn require_user(identity: &Identity) -> AppResult<&str> {
    identity
        .username()
        .ok_or_else(|| AppError::Auth("Please log in".into()))
}

async fn load_sheet(state: &AppState, owner: &str, name: &str) -> AppResult<Sheet> {
    state
        .repo
        .get_sheet(owner, name)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Sheet '{}'", name)).into())
}

pub async fn serve_new_sheet(State(state): State<AppState>) -> AppResult<Response> {
    let page = Page::load(state.templates(), "new_sheet.html")?;
    Ok(Html(page.render()).into_response())
}

pub async fn create_sheet(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Form(form): Form<SheetForm>,
) -> AppResult<Response> {
    let username = require_user(&identity)?;
    if form.name.trim().is_empty() {
        return Err(AppError::Form("Sheet name is required".into()));
    }
    // Taken by the creation form's own route.
    if form.name == "new" {
        return Err(AppError::Form("A sheet cannot be called 'new'".into()));
    }

    let sheet = build_sheet(username, form);
    tracing::info!(
        "Creating sheet '{}' for {} ({} items, {} feats, {} allies, {} spells)",
        sheet.name,
        username,
        sheet.inventory.len(),
        sheet.feats.len(),
        sheet.allies.len(),
        sheet.spells.len()
    );

    state.repo.insert_sheet(&sheet).await.map_err(|e| {
        tracing::warn!("Failed to store sheet '{}' for {}: {}", sheet.name, username, e);
        AppError::Repository(e)
    })?;

    Ok(Redirect::to(&pages::sheet_path(&sheet.name)).into_response())
}

pub async fn view_sheet(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(name): Path<String>,
) -> AppResult<Response> {
    let username = require_user(&identity)?;
    let sheet = load_sheet(&state, username, &name).await?;

    let page = render_sheet(Page::load(state.templates(), "sheet.html")?, &sheet);
    Ok(Html(page.render()).into_response())
}

pub async fn confirm_delete(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(name): Path<String>,
) -> AppResult<Response> {
    let username = require_user(&identity)?;
    let sheet = load_sheet(&state, username, &name).await?;

    let page = Page::load(state.templates(), "delete.html")?
        .text("name", &sheet.name)
        .text("action", format!("{}/delete", pages::sheet_path(&sheet.name)));
    Ok(Html(page.render()).into_response())
}

pub async fn delete_sheet(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(name): Path<String>,
) -> AppResult<Response> {
    let username = require_user(&identity)?;
    tracing::info!("Deleting sheet '{}' for {}", name, username);

    state.repo.delete_sheet(username, &name).await?;

    tracing::info!("Deleted sheet '{}' for {}", name, username);
    Ok(Redirect::to("/index/").into_response())
}

fn rows<T>(records: &[T], cells: impl Fn(&T) -> Vec<String>) -> String {
    records
        .iter()
        .map(|record| {
            let tds: String = cells(record)
                .iter()
                .map(|cell| format!("<td>{}</td>", encode_text(cell)))
                .collect();
            format!("<tr>{}</tr>", tds)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_sheet(page: Page, sheet: &Sheet) -> Page {
    let scores = &sheet.scores;
    let money = &sheet.money;

    page.text("name", &sheet.name)
        .text("characterName", &sheet.character_name)
        .text("age", sheet.age.to_string())
        .text("weight", &sheet.weight)
        .text("height", &sheet.height)
        .text("size", &sheet.size)
        .text("gender", &sheet.gender)
        .text("eyeColor", &sheet.eye_color)
        .text("skin", &sheet.skin)
        .text("class", &sheet.class)
        .text("race", &sheet.race)
        .text("level", sheet.level.to_string())
        .text("allignment", &sheet.allignment)
        .text("background", &sheet.background)
        .text("currentExpirience", sheet.current_expirience.to_string())
        .text("nextExpirience", sheet.next_expirience.to_string())
        .text("proficiency", sheet.proficiency.to_string())
        .text("strength", scores.strength.to_string())
        .text("dexterity", scores.dexterity.to_string())
        .text("constitution", scores.constitution.to_string())
        .text("intelligence", scores.intelligence.to_string())
        .text("wisdom", scores.wisdom.to_string())
        .text("charisma", scores.charisma.to_string())
        .html("saves", pages::list_items(&sheet.saves))
        .html("proficientSkills", pages::list_items(&sheet.proficient_skills))
        .html("expertSkills", pages::list_items(&sheet.expert_skills))
        .html("languages", pages::list_items(&sheet.languages))
        .html("tools", pages::list_items(&sheet.tools))
        .html("vehicles", pages::list_items(&sheet.vehicles))
        .html("weapons", pages::list_items(&sheet.weapons))
        .html("armor", pages::list_items(&sheet.armor))
        .html(
            "inventory",
            rows(&sheet.inventory, |i| vec![i.amount.to_string(), i.name.clone(), i.description.clone()]),
        )
        .text("ac", sheet.ac.to_string())
        .text("initiative", sheet.initiative.to_string())
        .text("speed", sheet.speed.to_string())
        .text("ideals", &sheet.ideals)
        .text("bonds", &sheet.bonds)
        .text("flaw", &sheet.flaw)
        .html("feats", rows(&sheet.feats, |f| vec![f.name.clone(), f.description.clone()]))
        .text("cp", money.cp.to_string())
        .text("sp", money.sp.to_string())
        .text("ep", money.ep.to_string())
        .text("gp", money.gp.to_string())
        .text("pp", money.pp.to_string())
        .text("passivePerception", sheet.passive_perception.to_string())
        .text("backstory", &sheet.backstory)
        .html("allies", rows(&sheet.allies, |a| vec![a.name.clone(), a.description.clone()]))
        .text("hitDieName", &sheet.hit_die.name)
        .text("hitDieAmount", sheet.hit_die.amount.to_string())
        .text("health", sheet.health.to_string())
        .html(
            "spells",
            rows(&sheet.spells, |s| vec![s.name.clone(), s.level.to_string(), s.description.clone()]),
        )
        .text("deleteLink", format!("{}/delete", pages::sheet_path(&sheet.name)))
}
