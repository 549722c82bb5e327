use chrono::NaiveDate;

use crate::consts::DATE_FORMAT;

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
