use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Upstream wall-clock times carry no zone and are Japan Standard Time.
const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Normalize an upstream date string, falling back to the current time.
pub fn normalize(raw: Option<&str>) -> DateTime<Utc> {
    normalize_at(raw, Utc::now())
}

/// Same as [`normalize`] with an explicit fallback instant.
pub fn normalize_at(raw: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return now;
    };

    parse(raw).unwrap_or_else(|| {
        tracing::debug!(value = %raw, "Unparseable upstream timestamp, using current time");
        now
    })
}

fn parse(raw: &str) -> Option<DateTime<Utc>> {
    if let Some(naive) = parse_wall_clock(raw) {
        let jst = FixedOffset::east_opt(JST_OFFSET_SECS)?;
        return jst
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // A bare date is read as UTC midnight.
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DDTHH:MM:SS`, nothing more.
fn parse_wall_clock(raw: &str) -> Option<NaiveDateTime> {
    let bytes = raw.as_bytes();
    if bytes.len() != 19 || !matches!(bytes[10], b' ' | b'T') {
        return None;
    }
    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        10 => true,
        13 | 16 => *b == b':',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }
    let normalized = format!("{} {}", &raw[..10], &raw[11..]);
    NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M:%S").ok()
}
