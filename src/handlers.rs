use crate::date_key::DateKey;
use crate::errors::AppError;
use crate::models::{
    AddBoxRequest, Category, CategoryView, DailyRecord, DayResponse, ToggleRequest,
};
use crate::state::AppState;
use crate::weekly::{WeeklyResponse, build_weekly_response, weekly_summary_at};
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn get_today(State(state): State<AppState>) -> Result<Json<DayResponse>, AppError> {
    let today = DateKey::today();
    let record = state
        .with_records(move |records| Ok(records.load_or_default(today)))
        .await?;
    Ok(Json(to_response(today, today, &record)))
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayResponse>, AppError> {
    let date: DateKey = date.parse()?;
    let record = state
        .with_records(move |records| Ok(records.load_or_default(date)))
        .await?;
    Ok(Json(to_response(date, DateKey::today(), &record)))
}

pub async fn add_box(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<AddBoxRequest>,
) -> Result<Json<DayResponse>, AppError> {
    let date: DateKey = date.parse()?;
    let record = state
        .with_records(move |records| Ok(records.add_box(date, payload.category)?))
        .await?;
    Ok(Json(to_response(date, DateKey::today(), &record)))
}

pub async fn toggle_box(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<DayResponse>, AppError> {
    let date: DateKey = date.parse()?;
    let record = state
        .with_records(move |records| {
            Ok(records.toggle_box(date, payload.category, payload.index)?)
        })
        .await?;
    Ok(Json(to_response(date, DateKey::today(), &record)))
}

pub async fn get_weekly(State(state): State<AppState>) -> Result<Json<WeeklyResponse>, AppError> {
    let today = DateKey::today();
    let days = state
        .with_records(move |records| Ok(weekly_summary_at(today, records)))
        .await?;
    Ok(Json(build_weekly_response(&days)))
}

fn to_response(date: DateKey, today: DateKey, record: &DailyRecord) -> DayResponse {
    DayResponse {
        date,
        label: date.label(),
        is_today: date.is_today(today),
        previous: date.previous(),
        next: date.next(),
        categories: Category::ALL
            .iter()
            .map(|category| {
                let entry = record.entry(*category);
                CategoryView {
                    category: *category,
                    title: category.title().to_string(),
                    default_quota: category.default_quota(),
                    box_count: entry.box_count(),
                    checked: entry.checked().to_vec(),
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn key(y: i32, m: u32, d: u32) -> DateKey {
        DateKey::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn is_today_follows_the_supplied_day() {
        let record = DailyRecord::default();
        let day = key(2026, 10, 19);

        assert!(to_response(day, day, &record).is_today);
        assert!(!to_response(day, key(2026, 10, 20), &record).is_today);
    }

    #[test]
    fn response_lists_every_category_with_neighbours() {
        let day = key(2026, 3, 1);
        let response = to_response(day, day, &DailyRecord::default());

        assert_eq!(response.previous, Some(key(2026, 2, 28)));
        assert_eq!(response.next, Some(key(2026, 3, 2)));
        assert_eq!(response.label, "Sunday, Mar 1");
        assert_eq!(response.categories.len(), 5);
        assert_eq!(response.categories[0].category, Category::Protein);
        assert_eq!(response.categories[0].box_count, 8);
    }
}
