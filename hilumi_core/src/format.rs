//! Display formatting for member records.

use crate::members::Member;

/// Groups digits in threes with commas (`47832` -> `"47,832"`).
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_storage(tb: f64) -> String {
    format!("{:.1} TB", tb)
}

pub fn format_distance(km: f64) -> String {
    format!("{:.1} km", km)
}

/// One list row: name, affiliation, position, storage, credits and
/// (when known) the distance from ATLAS.
pub fn format_member_line(member: &Member, distance_km: Option<f64>) -> String {
    let mut line = member.name.clone();
    if let Some(inst) = &member.institution {
        line.push_str(&format!(" [{}]", inst));
    }
    line.push_str(&format!(
        " | lat {:.4}°, lon {:.4}° | {} TB | {} credits",
        member.lat,
        member.lon,
        member.storage_tb,
        format_number(member.credits)
    ));
    if let Some(km) = distance_km {
        line.push_str(&format!(" | {} from ATLAS", format_distance(km)));
    }
    line
}

/// Footer shown when a list is cut at `limit`, or `None` if it is not.
pub fn truncation_note(limit: usize, total: usize) -> Option<String> {
    (total > limit).then(|| format!("Showing first {} of {} members", limit, total))
}
