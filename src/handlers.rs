use crate::buckets::today_in;
use crate::calendar::{build_calendar_at, parse_month};
use crate::errors::AppError;
use crate::models::{
    CalendarMonth, EditEntryRequest, IndexQuery, Intensity, MonthQuery, MoodEntry, MoodStats,
    NewEntryForm, NewEntryRequest, TrendSeries, UpdateResponse,
};
use crate::state::AppState;
use crate::stats::build_stats;
use crate::trend::build_trend;
use crate::ui::{self, View};
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use tracing::debug;

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Result<Html<String>, AppError> {
    let view = View::from_query(query.view.as_deref());
    let offset = state.utc_offset;
    let today = today_in(offset);
    let store = state.store.lock().await;
    let entries = store.snapshot();

    let content = match view {
        View::Add => ui::render_add(today),
        View::List => ui::render_list(entries, query.edit.as_deref(), offset),
        View::Calendar => {
            let month = resolve_month(query.month.as_deref(), today)?;
            ui::render_calendar(&build_calendar_at(month, today, entries, offset))
        }
        View::Trends => ui::render_trend(&build_trend(entries, offset)),
    };
    let stats = (view != View::Add).then(|| build_stats(entries));
    let saved = query.saved.as_deref() == Some("1");

    Ok(Html(ui::render_page(view, &content, stats.as_ref(), saved)))
}

pub async fn form_add(
    State(state): State<AppState>,
    Form(form): Form<NewEntryForm>,
) -> Result<Redirect, AppError> {
    let mood = if form.custom_mood.trim().is_empty() {
        form.mood
    } else {
        form.custom_mood
    };
    let now = Utc::now();
    let date = parse_form_date(&form.date, state.utc_offset, now)?;

    add_entry(&state, &mood, form.intensity, form.note, date).await?;
    Ok(Redirect::to("/?view=add&saved=1"))
}

pub async fn form_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<EditEntryRequest>,
) -> Result<Redirect, AppError> {
    apply_edit(&state, &id, form).await?;
    Ok(Redirect::to("/?view=list"))
}

pub async fn list_entries(State(state): State<AppState>) -> Json<Vec<MoodEntry>> {
    let store = state.store.lock().await;
    Json(store.snapshot().to_vec())
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(payload): Json<NewEntryRequest>,
) -> Result<(StatusCode, Json<MoodEntry>), AppError> {
    let date = payload.date.unwrap_or_else(Utc::now);
    let entry = add_entry(&state, &payload.mood, payload.intensity, payload.note, date).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn edit_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<EditEntryRequest>,
) -> Result<Json<UpdateResponse>, AppError> {
    let entry = apply_edit(&state, &id, payload).await?;
    Ok(Json(UpdateResponse {
        updated: entry.is_some(),
        entry,
    }))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CalendarMonth>, AppError> {
    let offset = state.utc_offset;
    let today = today_in(offset);
    let month = resolve_month(query.month.as_deref(), today)?;
    let store = state.store.lock().await;
    Ok(Json(build_calendar_at(month, today, store.snapshot(), offset)))
}

pub async fn get_trend(State(state): State<AppState>) -> Json<TrendSeries> {
    let store = state.store.lock().await;
    Json(build_trend(store.snapshot(), state.utc_offset))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<MoodStats> {
    let store = state.store.lock().await;
    Json(build_stats(store.snapshot()))
}

async fn add_entry(
    state: &AppState,
    mood: &str,
    intensity: i64,
    note: String,
    date: DateTime<Utc>,
) -> Result<MoodEntry, AppError> {
    let mood = validate_mood(mood)?;
    let intensity = Intensity::try_from(intensity)?;

    let mut store = state.store.lock().await;
    let entry = MoodEntry {
        id: store.next_id(Utc::now()),
        date,
        mood,
        intensity,
        note,
    };
    store.append(entry.clone()).await?;

    Ok(entry)
}

/// Rewrites mood, intensity and note of an existing entry. The id and date are
/// carried over from the stored entry; an unknown id changes nothing.
async fn apply_edit(
    state: &AppState,
    id: &str,
    edit: EditEntryRequest,
) -> Result<Option<MoodEntry>, AppError> {
    let mood = validate_mood(&edit.mood)?;
    let intensity = Intensity::try_from(edit.intensity)?;

    let mut store = state.store.lock().await;
    let Some(existing) = store.get(id) else {
        debug!(id, "edit requested for unknown entry");
        return Ok(None);
    };
    let edited = MoodEntry {
        id: existing.id.clone(),
        date: existing.date,
        mood,
        intensity,
        note: edit.note,
    };

    let updated = store.update(edited.clone()).await?;
    Ok(updated.then_some(edited))
}

fn validate_mood(mood: &str) -> Result<String, AppError> {
    let mood = mood.trim();
    if mood.is_empty() {
        return Err(AppError::bad_request("mood must not be empty"));
    }
    Ok(mood.to_owned())
}

fn resolve_month(month: Option<&str>, today: NaiveDate) -> Result<NaiveDate, AppError> {
    match month.filter(|value| !value.trim().is_empty()) {
        Some(value) => parse_month(value)
            .ok_or_else(|| AppError::bad_request(format!("month must look like YYYY-MM, got {value:?}"))),
        None => Ok(today),
    }
}

/// A picked calendar day keeps the current time of day, evaluated in `offset`.
fn parse_form_date(
    raw: &str,
    offset: FixedOffset,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(now);
    }
    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::bad_request(format!("date must look like YYYY-MM-DD, got {raw:?}")))?;
    let local = day.and_time(now.with_timezone(&offset).time());
    local
        .and_local_timezone(offset)
        .single()
        .map(|date| date.with_timezone(&Utc))
        .ok_or_else(|| AppError::bad_request(format!("date {raw:?} does not exist in the configured offset")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn validate_mood_trims_and_rejects_blank() {
        assert_eq!(validate_mood("  😊 Happy ").unwrap(), "😊 Happy");
        assert!(validate_mood("   ").is_err());
    }

    #[test]
    fn blank_form_date_means_now() {
        let now = Utc.with_ymd_and_hms(2024, 5, 5, 13, 14, 15).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(parse_form_date("", utc, now).unwrap(), now);
    }

    #[test]
    fn form_date_keeps_time_of_day_in_offset() {
        let now = Utc.with_ymd_and_hms(2024, 5, 5, 22, 30, 0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        let date = parse_form_date("2024-01-10", plus_two, now).unwrap();
        let local = date.with_timezone(&plus_two);

        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!((local.hour(), local.minute()), (0, 30));
    }

    #[test]
    fn malformed_form_date_is_rejected() {
        let now = Utc::now();
        let utc = FixedOffset::east_opt(0).unwrap();
        let err = parse_form_date("10/01/2024", utc, now).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn month_selector_defaults_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 19).unwrap();
        assert_eq!(resolve_month(None, today).unwrap(), today);
        assert_eq!(resolve_month(Some(""), today).unwrap(), today);
        assert_eq!(
            resolve_month(Some("2023-02"), today).unwrap(),
            NaiveDate::from_ymd_opt(2023, 2, 1).unwrap()
        );
        assert!(resolve_month(Some("Feb"), today).is_err());
    }
}
