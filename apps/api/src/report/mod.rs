//! Career report rendering.
//!
//! Produces the downloadable report for a single match as markdown. Sections,
//! in order: header, career overview, match score, career insights, match
//! breakdown, required skills, industry trends, next steps, footer.

pub mod handlers;

use std::fmt::Write;

use chrono::NaiveDate;

use crate::matching::CareerMatchResult;

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;

pub const DEFAULT_READER: &str = "Student";

const NEXT_STEPS: [&str; 5] = [
    "Research educational pathways and degree programs for this career",
    "Connect with professionals in this field for informational interviews",
    "Explore internship opportunities to gain hands-on experience",
    "Develop the required skills through online courses or workshops",
    "Join relevant communities and professional associations",
];

/// Formats one rupee amount in crore, lakh or thousand units. Zero renders as `N/A`.
pub fn format_rupees(value: u64) -> String {
    if value == 0 {
        "N/A".to_string()
    } else if value >= CRORE {
        let crores = (value as f64 / 1_000_000.0).round() / 10.0;
        format!("₹{crores:.1}Cr")
    } else if value >= LAKH {
        format!("₹{}L", (value as f64 / LAKH as f64).round() as u64)
    } else {
        format!("₹{}K", (value as f64 / 1_000.0).round() as u64)
    }
}

/// `min - max`, each formatted with [`format_rupees`]. A zero max means no
/// upper bound is known, so only the min is shown.
pub fn format_salary(min: u64, max: u64) -> String {
    if max == 0 {
        return format_rupees(min);
    }
    format!("{} - {}", format_rupees(min), format_rupees(max))
}

pub fn render_career_report(
    result: &CareerMatchResult<'_>,
    user_name: &str,
    generated_on: NaiveDate,
) -> String {
    let career = result.career;
    let mut md = String::from("# DreamWeave\n\n_Career Insights Report_\n\n");
    // Writing into a String cannot fail.
    let _ = writeln!(md, "Prepared for: {user_name}\n");

    let _ = writeln!(md, "## {}\n", career.title);
    let _ = writeln!(md, "**{}**\n", career.category);
    let _ = writeln!(md, "{}\n", career.description);

    let _ = writeln!(md, "**Match Score: {}%**\n", result.match_score);

    md.push_str("## Career Insights\n\n");
    let _ = writeln!(
        md,
        "- **Salary Range:** {}",
        format_salary(career.salary_range.min, career.salary_range.max)
    );
    let _ = writeln!(md, "- **Growth Potential:** {}%", career.growth_potential);
    let _ = writeln!(md, "- **Stress Level:** {}%", career.stress_index);
    let _ = writeln!(md, "- **Mismatch Risk:** {}%\n", career.mismatch_probability);

    md.push_str("## Your Match Breakdown\n\n");
    let breakdown = &result.breakdown;
    let _ = writeln!(md, "- **Personality Match:** {}%", breakdown.personality_match);
    let _ = writeln!(md, "- **Skills Match:** {}%", breakdown.skills_match);
    let _ = writeln!(md, "- **Interests Match:** {}%\n", breakdown.interests_match);

    if !career.required_skills.is_empty() {
        md.push_str("## Required Skills\n\n");
        for skill in &career.required_skills {
            let _ = writeln!(md, "- {skill}");
        }
        md.push('\n');
    }

    if !career.industry_trends.trim().is_empty() {
        md.push_str("## Industry Trends & Outlook\n\n");
        let _ = writeln!(md, "{}\n", career.industry_trends.trim());
    }

    md.push_str("## Recommended Next Steps\n\n");
    for (idx, step) in NEXT_STEPS.iter().enumerate() {
        let _ = writeln!(md, "{}. {step}", idx + 1);
    }

    let _ = write!(
        md,
        "\n---\n\n_Generated by DreamWeave - {}_\n",
        generated_on.format("%d %B %Y")
    );
    md
}

/// File name offered for download, e.g. `DreamWeave_Software_Engineer_Report.md`.
pub fn report_file_name(career_title: &str) -> String {
    let slug = career_title.split_whitespace().collect::<Vec<_>>().join("_");
    format!("DreamWeave_{slug}_Report.md")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_career;
    use crate::matching::MatchBreakdown;

    #[test]
    fn test_format_rupees_units() {
        assert_eq!(format_rupees(0), "N/A");
        assert_eq!(format_rupees(45_000), "₹45K");
        assert_eq!(format_rupees(600_000), "₹6L");
        assert_eq!(format_rupees(1_850_000), "₹19L");
        assert_eq!(format_rupees(10_000_000), "₹1.0Cr");
        assert_eq!(format_rupees(25_500_000), "₹2.6Cr");
    }

    #[test]
    fn test_format_salary_range() {
        assert_eq!(format_salary(600_000, 1_800_000), "₹6L - ₹18L");
        assert_eq!(format_salary(600_000, 0), "₹6L");
        assert_eq!(format_salary(0, 0), "N/A");
        assert_eq!(format_salary(0, 1_800_000), "N/A - ₹18L");
    }

    #[test]
    fn test_report_sections_in_order() {
        let career = sample_career("alpha", "Alpha Analyst");
        let result = CareerMatchResult {
            career: &career,
            match_score: 83,
            breakdown: MatchBreakdown {
                personality_match: 50,
                skills_match: 100,
                interests_match: 100,
            },
        };
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let md = render_career_report(&result, "Asha", date);

        let headings = [
            "# DreamWeave",
            "Prepared for: Asha",
            "## Alpha Analyst",
            "**Match Score: 83%**",
            "## Career Insights",
            "## Your Match Breakdown",
            "## Required Skills",
            "## Industry Trends & Outlook",
            "## Recommended Next Steps",
            "_Generated by DreamWeave - 14 March 2025_",
        ];
        let mut cursor = 0;
        for heading in headings {
            let pos = md[cursor..]
                .find(heading)
                .unwrap_or_else(|| panic!("missing or out of order: {heading}"));
            cursor += pos + heading.len();
        }

        assert!(md.contains("- **Salary Range:** ₹1L - ₹2L"));
        assert!(md.contains("- **Skills Match:** 100%"));
        assert!(md.contains("5. Join relevant communities"));
    }

    #[test]
    fn test_report_skips_empty_sections() {
        let mut career = sample_career("alpha", "Alpha");
        career.required_skills.clear();
        career.industry_trends = " ".to_string();
        let result = CareerMatchResult {
            career: &career,
            match_score: 0,
            breakdown: MatchBreakdown::default(),
        };
        let md = render_career_report(&result, DEFAULT_READER, NaiveDate::default());
        assert!(!md.contains("## Required Skills"));
        assert!(!md.contains("## Industry Trends"));
        assert!(md.contains("Prepared for: Student"));
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(
            report_file_name("Software  Engineer"),
            "DreamWeave_Software_Engineer_Report.md"
        );
    }
}
