use std::fmt;

pub(crate) fn rule(f: &mut fmt::Formatter<'_>, ch: char, width: usize) -> fmt::Result {
    writeln!(f, "{}", ch.to_string().repeat(width))
}

/// Indented dashed divider the tables use under their headings.
pub(crate) fn divider(f: &mut fmt::Formatter<'_>, width: usize) -> fmt::Result {
    writeln!(f, "  {}", "-".repeat(width.saturating_sub(2)))
}

pub(crate) fn banner(f: &mut fmt::Formatter<'_>, width: usize, title: &str) -> fmt::Result {
    rule(f, '=', width)?;
    writeln!(f, "  {title}")?;
    rule(f, '=', width)
}

/// `#` for the scored share of 100, `-` for the remainder.
pub fn score_bar(score: f64, width: usize) -> String {
    let filled = (score / 100.0 * width as f64)
        .round_ties_even()
        .clamp(0.0, width as f64) as usize;
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let head: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{head}...")
}

pub fn thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Greedy word wrap; a line is closed before it would pass `width` columns.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line: Vec<&str> = Vec::new();
    let mut used = 0;

    for word in text.split_whitespace() {
        let len = word.chars().count();
        if !line.is_empty() && used + len > width {
            lines.push(line.join(" "));
            line.clear();
            used = 0;
        }
        line.push(word);
        used += len + 1;
    }
    if !line.is_empty() {
        lines.push(line.join(" "));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_fixed_width() {
        assert_eq!(score_bar(80.4, 50), format!("{}{}", "#".repeat(40), "-".repeat(10)));
        assert_eq!(score_bar(0.0, 10), "----------");
        assert_eq!(score_bar(100.0, 10), "##########");
        assert_eq!(score_bar(19.2, 50).len(), 50);
    }

    #[test]
    fn truncate_adds_ellipsis_only_when_needed() {
        assert_eq!(truncate("Short", 10), "Short");
        assert_eq!(truncate("Northside Community Clinic", 14), "Northside C...");
    }

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(380), "380");
        assert_eq!(thousands(2400), "2,400");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn wrap_keeps_lines_within_width() {
        let text = "Supporting 22 providers with 1 BH staff is a tough spot - Rula works \
                    alongside practices like Metro Health Associates to take on overflow.";
        let lines = wrap(text, 70);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| line.chars().count() <= 70));
        assert_eq!(lines.join(" "), text);
    }
}
