use chrono::{DateTime, Datelike, Utc};
use color_eyre::Result;

use super::helpers::query_optional;
use super::models::ResetStateModel;
use super::Db;

/// A weekly reset is due when one has never run or at least a full week
/// has elapsed since the last one.
fn weekly_reset_due(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match last {
        None => true,
        Some(last) => (now - last).num_weeks() >= 1,
    }
}

/// A monthly reset is due once per calendar month change, not per 30
/// elapsed days.
fn monthly_reset_due(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match last {
        None => true,
        Some(last) => {
            let months = (now.year() - last.year()) * 12 + (now.month() as i32 - last.month() as i32);
            months >= 1
        }
    }
}

fn parse_timestamp(value: &Option<String>) -> Option<DateTime<Utc>> {
    value
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
}

/// What a reset check did, for logging and tests.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ResetReport {
    pub weekly: bool,
    pub monthly: bool,
}

impl Db {
    pub async fn reset_state(&self) -> Result<ResetStateModel> {
        let conn = self.connect()?;
        let state = query_optional(
            &conn,
            "SELECT last_weekly_reset, last_monthly_reset FROM score_resets WHERE id = 1",
            (),
        )
        .await?;
        Ok(state.unwrap_or_default())
    }

    /// Seed the singleton reset row with `now` for both periods, without
    /// disturbing an existing one.
    pub async fn initialize_reset_state(&self, now: DateTime<Utc>) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            r#"
            INSERT INTO score_resets (id, last_weekly_reset, last_monthly_reset)
            VALUES (1, ?1, ?1)
            ON CONFLICT(id) DO NOTHING
            "#,
            libsql::params![now.to_rfc3339()],
        )
        .await?;
        Ok(())
    }

    /// Zero the weekly/monthly score of every profile when the period has
    /// rolled over, advancing the matching timestamp in the same
    /// transaction: readers never see zeroed scores with a stale
    /// timestamp or the reverse. No-op when neither period is due.
    pub async fn check_and_reset_scores(&self, now: DateTime<Utc>) -> Result<ResetReport> {
        let state = self.reset_state().await?;

        let report = ResetReport {
            weekly: weekly_reset_due(parse_timestamp(&state.last_weekly_reset), now),
            monthly: monthly_reset_due(parse_timestamp(&state.last_monthly_reset), now),
        };

        if !report.weekly && !report.monthly {
            return Ok(report);
        }

        let conn = self.connect()?;
        let tx = conn.transaction().await?;
        let stamp = now.to_rfc3339();

        if report.weekly {
            tx.execute("UPDATE users SET weekly_score = 0", ()).await?;
            tx.execute(
                r#"
                INSERT INTO score_resets (id, last_weekly_reset) VALUES (1, ?1)
                ON CONFLICT(id) DO UPDATE SET last_weekly_reset = ?1
                "#,
                libsql::params![stamp.clone()],
            )
            .await?;
        }

        if report.monthly {
            tx.execute("UPDATE users SET monthly_score = 0", ()).await?;
            tx.execute(
                r#"
                INSERT INTO score_resets (id, last_monthly_reset) VALUES (1, ?1)
                ON CONFLICT(id) DO UPDATE SET last_monthly_reset = ?1
                "#,
                libsql::params![stamp.clone()],
            )
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "score reset performed: weekly={}, monthly={}",
            report.weekly,
            report.monthly
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn weekly_due_after_seven_days_or_when_never_run() {
        let now = at(2025, 3, 10);
        assert!(weekly_reset_due(None, now));
        assert!(weekly_reset_due(Some(at(2025, 3, 2)), now));
        assert!(!weekly_reset_due(Some(at(2025, 3, 5)), now));
    }

    #[test]
    fn monthly_due_on_calendar_month_change() {
        let now = at(2025, 3, 1);
        // Feb 28 -> Mar 1 is a month boundary even though only a day passed
        assert!(monthly_reset_due(Some(at(2025, 2, 28)), now));
        // 30 days within the same month is not
        assert!(!monthly_reset_due(Some(at(2025, 3, 1)), at(2025, 3, 31)));
        // year rollover counts
        assert!(monthly_reset_due(Some(at(2024, 12, 15)), at(2025, 1, 2)));
        assert!(monthly_reset_due(None, now));
    }
}
