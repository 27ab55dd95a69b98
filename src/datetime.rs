//! MS-DOS date/time decoding, as stored in local and central-directory headers.

use chrono::NaiveDateTime;

/// Decodes a packed MS-DOS `(date, time)` pair into a calendar datetime.
///
/// Date is `yyyyyyymmmmddddd`: 7 bits year (offset from 1980), 4 bits month,
/// 5 bits day. Time is `hhhhhmmmmmmsssss`: 5 bits hour, 6 bits minute, 5 bits
/// seconds (the stored value is half the actual seconds). Invalid calendar
/// values (month 0 or > 12, day 0 or out of range for the month, etc.) yield
/// `None` rather than an error — the entry remains usable, just without a
/// modification time.
pub fn decode_msdos_datetime(date: u16, time: u16) -> Option<NaiveDateTime> {
    let year = 1980 + ((date >> 9) & 0x7f) as i32;
    let month = ((date >> 5) & 0x0f) as u32;
    let day = (date & 0x1f) as u32;

    let hour = ((time >> 11) & 0x1f) as u32;
    let minute = ((time >> 5) & 0x3f) as u32;
    let second = ((time & 0x1f) as u32) * 2;

    let date = chrono::NaiveDate::from_ymd_opt(year, month, day)?;
    let time = chrono::NaiveTime::from_hms_opt(hour, minute, second)?;
    Some(NaiveDateTime::new(date, time))
}
