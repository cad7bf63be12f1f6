use rusqlite::Connection;
use time::{Month, OffsetDateTime, PrimitiveDateTime, UtcOffset, macros::time};

use crate::{
    db::initialize,
    transaction::{Transaction, create_transaction},
};

pub(crate) fn get_test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}

/// Noon UTC on `day` of `month` in the current year.
pub(crate) fn in_month(month: Month, day: u8) -> OffsetDateTime {
    let year = OffsetDateTime::now_utc().year();
    let date = time::Date::from_calendar_date(year, month, day).unwrap();

    PrimitiveDateTime::new(date, time!(12:00)).assume_offset(UtcOffset::UTC)
}

/// Noon UTC on the first day of the current month.
pub(crate) fn in_current_month() -> OffsetDateTime {
    in_month(OffsetDateTime::now_utc().month(), 1)
}

pub(crate) fn create_test_sale(
    price: f64,
    sold: bool,
    category: &str,
    date_of_sale: OffsetDateTime,
    connection: &Connection,
) -> Transaction {
    create_transaction(
        Transaction::build("Test product", price, category, date_of_sale).sold(sold),
        connection,
    )
    .expect("Could not create test sale")
}

#[cfg(test)]
mod tests {
    use time::{Month, OffsetDateTime, macros::time};

    use super::{in_current_month, in_month};

    #[test]
    fn in_month_is_noon_utc_in_current_year() {
        let got = in_month(Month::March, 10);

        assert_eq!(got.year(), OffsetDateTime::now_utc().year());
        assert_eq!(got.month(), Month::March);
        assert_eq!(got.day(), 10);
        assert_eq!(got.time(), time!(12:00));
        assert!(got.offset().is_utc());
    }

    #[test]
    fn in_current_month_is_first_of_month() {
        let got = in_current_month();

        assert_eq!(got.month(), OffsetDateTime::now_utc().month());
        assert_eq!(got.day(), 1);
    }
}
