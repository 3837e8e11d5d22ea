//! Calendar command

use anyhow::{Result, bail};
use chrono::Datelike;

use rickmorty::stats::{MonthGrid, combined_dates, month_grid};

use super::{AppContext, now};

/// Show a month grid of days with any completion
pub async fn calendar_command(ctx: &AppContext, month: Option<&str>) -> Result<()> {
    let today = now().date();
    let (year, month) = match month {
        Some(raw) => parse_month(raw)?,
        None => (today.year(), today.month()),
    };

    let tracker = ctx.load_tracker().await?;
    let completed = combined_dates(tracker.habits());
    let grid = month_grid(
        year,
        month,
        &completed,
        today,
        ctx.config.settings.week_start.weekday(),
    )?;

    print_grid(&grid);
    Ok(())
}

fn parse_month(raw: &str) -> Result<(i32, u32)> {
    let parsed = raw
        .trim()
        .split_once('-')
        .and_then(|(y, m)| Some((y.parse::<i32>().ok()?, m.parse::<u32>().ok()?)));
    match parsed {
        Some(ym) => Ok(ym),
        None => bail!("Invalid month '{}', expected YYYY-MM", raw),
    }
}

fn print_grid(grid: &MonthGrid) {
    println!("{:04}-{:02}", grid.year, grid.month);
    println!(" {}", grid.header().map(|h| format!("{:<4}", h)).concat());

    for week in &grid.weeks {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                None => "    ".to_string(),
                Some(day) => {
                    let mark = if day.completed {
                        '*'
                    } else if day.is_today {
                        '<'
                    } else {
                        ' '
                    };
                    format!("{:>3}{}", day.date.day(), mark)
                }
            })
            .collect();
        println!(" {}", row);
    }

    println!(
        "\n{}/{} days completed (* completed, < today)",
        grid.completed_days(),
        grid.total_days()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2023-08").unwrap(), (2023, 8));
        assert!(parse_month("August").is_err());
    }
}
