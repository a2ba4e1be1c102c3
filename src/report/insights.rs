//! Insight Reporter Module
//!
//! The four observations are static commentary carried over from the source
//! analysis; they are deliberately not recomputed from the live table.

pub const INSIGHTS: [&str; 4] = [
    "- Younger passengers had a slightly higher survival rate.",
    "- Females had a much higher survival rate compared to males.",
    "- First-class passengers had the highest survival rate, while third-class had the lowest.",
    "- There is a strong positive correlation between Pclass and survival.",
];

pub struct Reporter;

impl Reporter {
    pub fn print_insights() {
        println!("\nInsights from EDA:");
        for line in INSIGHTS {
            println!("{line}");
        }
    }
}
