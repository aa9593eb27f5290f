use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tracing::{debug, info};

use encyclopedia_core::{EntryDraft, EntryError, EntryResult, Resolution, Store};

use crate::dto::{EditPageForm, NewPageForm, SearchQuery};
use crate::error::{not_found_response, PageError};
use crate::markdown::render_markdown_html;
use crate::pages::{self, edit_href, wiki_href, NewPageView};
use crate::WebState;

type PageResult = Result<Response, PageError>;

/// Run a store call on the blocking pool; entry files are read synchronously.
async fn with_store<T, F>(state: &WebState, f: F) -> Result<EntryResult<T>, PageError>
where
    T: Send + 'static,
    F: FnOnce(&Store) -> EntryResult<T> + Send + 'static,
{
    let store = state.store.clone();
    Ok(tokio::task::spawn_blocking(move || f(&store)).await?)
}

pub async fn index(State(state): State<WebState>) -> PageResult {
    let titles = with_store(&state, |store| store.list_titles()).await??;
    Ok(Html(pages::index(&titles)).into_response())
}

pub async fn article(State(state): State<WebState>, Path(title): Path<String>) -> PageResult {
    let lookup = title.clone();
    let entry = with_store(&state, move |store| store.find(&lookup)).await??;

    match entry {
        Some(entry) if entry.title == title => {
            let html = render_markdown_html(&entry.content);
            Ok(Html(pages::article(&entry.title, &html)).into_response())
        }
        Some(entry) => {
            debug!("Redirecting {:?} to stored title {:?}", title, entry.title);
            Ok(Redirect::to(&wiki_href(&entry.title)).into_response())
        }
        None => Ok(not_found_response(&title)),
    }
}

pub async fn random_article(State(state): State<WebState>) -> PageResult {
    match with_store(&state, |store| store.random_title()).await? {
        Ok(title) => Ok(Redirect::to(&wiki_href(&title)).into_response()),
        Err(EntryError::EmptyCollection) => Ok(Redirect::to("/").into_response()),
        Err(err) => Err(err.into()),
    }
}

pub async fn search(State(state): State<WebState>, Query(query): Query<SearchQuery>) -> PageResult {
    let term = query.term().map(str::to_string);
    let lookup = term.clone();
    let resolution = with_store(&state, move |store| store.resolve(lookup.as_deref())).await??;

    match resolution {
        Resolution::EmptyQuery => Ok(Redirect::to("/").into_response()),
        Resolution::ExactMatch(title) => Ok(Redirect::to(&wiki_href(&title)).into_response()),
        Resolution::SearchResults(matches) => {
            let term = term.unwrap_or_default();
            Ok(Html(pages::search_results(&term, &matches)).into_response())
        }
    }
}

pub async fn new_page_form() -> Html<String> {
    Html(pages::new_page(&NewPageView::default()))
}

pub async fn create_page(State(state): State<WebState>, Form(form): Form<NewPageForm>) -> PageResult {
    let draft: EntryDraft = form.into();
    let submitted = draft.clone();

    match with_store(&state, move |store| store.create(draft)).await? {
        Ok(entry) => {
            info!("Created {:?} via web", entry.title);
            Ok(Redirect::to(&wiki_href(&entry.title)).into_response())
        }
        Err(EntryError::Invalid(errors)) => {
            let view = NewPageView {
                title: &submitted.title,
                content: &submitted.content,
                errors: Some(&errors),
                existing: None,
            };
            Ok((StatusCode::BAD_REQUEST, Html(pages::new_page(&view))).into_response())
        }
        Err(EntryError::AlreadyExists { existing }) => {
            let view = NewPageView {
                title: &submitted.title,
                content: &submitted.content,
                errors: None,
                existing: Some(&existing),
            };
            Ok((StatusCode::CONFLICT, Html(pages::new_page(&view))).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn edit_page_form(
    State(state): State<WebState>,
    Path(title): Path<String>,
) -> PageResult {
    let lookup = title.clone();
    let entry = with_store(&state, move |store| store.find(&lookup)).await??;

    match entry {
        Some(entry) if entry.title == title => {
            Ok(Html(pages::edit_page(&entry.title, &entry.content, None)).into_response())
        }
        Some(entry) => Ok(Redirect::to(&edit_href(&entry.title)).into_response()),
        None => Ok(not_found_response(&title)),
    }
}

pub async fn update_page(
    State(state): State<WebState>,
    Path(title): Path<String>,
    Form(form): Form<EditPageForm>,
) -> PageResult {
    let lookup = title.clone();
    let content = form.content.clone();

    match with_store(&state, move |store| store.update(&lookup, &content)).await? {
        Ok(entry) => {
            info!("Updated {:?} via web", entry.title);
            Ok(Redirect::to(&wiki_href(&entry.title)).into_response())
        }
        Err(EntryError::Invalid(errors)) => Ok((
            StatusCode::BAD_REQUEST,
            Html(pages::edit_page(&title, &form.content, Some(&errors))),
        )
            .into_response()),
        Err(err) => Err(err.into()),
    }
}

pub async fn fallback() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(pages::message("Not Found", "There is nothing at this address.")),
    )
        .into_response()
}
