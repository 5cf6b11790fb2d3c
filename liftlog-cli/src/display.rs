use liftlog::LoggedSet;

/// Whole-number volume with thousands separators, e.g. `12,345`.
pub fn format_volume(volume: f64) -> String {
    let rounded = format!("{:.0}", volume.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if volume < 0.0 && rounded != "0" {
        grouped.insert(0, '-');
    }
    grouped
}

pub const TABLE_HEADER: &str = "   id  workout_date  exercise              sets  reps   weight      volume";

pub fn table_row(entry: &LoggedSet) -> String {
    format!(
        "{:>5}  {:<12}  {:<20}  {:>4}  {:>4}  {:>7.1}  {:>10.1}",
        entry.id,
        entry.workout_date.to_string(),
        truncate(&entry.exercise, 20),
        entry.sets,
        entry.reps,
        entry.weight,
        entry.volume
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('~');
        out
    }
}
