use crate::models::settings::Settings;
use crate::models::ui::ViewType;
use rusqlite::types::Type;
use rusqlite::Row;

pub fn row_to_settings(row: &Row) -> Result<Settings, rusqlite::Error> {
    let current_view: String = row.get(2)?;
    let current_view = current_view.parse::<ViewType>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, Type::Text, e.into())
    })?;

    Ok(Settings {
        id: Some(row.get(0)?),
        include_weekends: row.get::<_, i32>(1)? != 0,
        current_view,
    })
}
