//! Terminal rendering of prediction reports.

use crate::predictor::{Outcome, PredictionReport};

const BAR_WIDTH: usize = 30;

/// Fixed-width bar for a percentage in [0, 100].
pub fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn render_report(report: &PredictionReport) -> String {
    let mut out = format!("🏏 Balls left: {}\n\n", report.balls_left);
    match report.outcome {
        Outcome::AlreadyWon => {
            out.push_str(&format!("🏆 {} has already won the match!\n", report.batting_team));
        }
        Outcome::Probabilities(r) => {
            out.push_str("📈 Winning chances\n");
            out.push_str(&format!(
                "🏆 {:<28} {} {:>6.2}%\n",
                report.batting_team.name(),
                progress_bar(r.win_probability),
                r.win_probability
            ));
            out.push_str(&format!(
                "💥 {:<28} {} {:>6.2}%\n",
                report.bowling_team.name(),
                progress_bar(r.loss_probability),
                r.loss_probability
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cricket::Team;
    use crate::predictor::PredictionResult;

    fn report(outcome: Outcome) -> PredictionReport {
        PredictionReport {
            batting_team: Team::RajasthanRoyals,
            bowling_team: Team::DelhiCapitals,
            balls_left: 46,
            outcome,
        }
    }

    #[test]
    fn bar_is_fixed_width() {
        for p in [0.0, 12.5, 50.0, 99.99, 100.0, 150.0, -3.0] {
            assert_eq!(progress_bar(p).chars().count(), BAR_WIDTH + 2);
        }
        assert_eq!(progress_bar(50.0).matches('█').count(), 15);
        assert_eq!(progress_bar(0.0).matches('█').count(), 0);
    }

    #[test]
    fn already_won_names_batting_team() {
        let text = render_report(&report(Outcome::AlreadyWon));
        assert!(text.contains("Balls left: 46"));
        assert!(text.contains("Rajasthan Royals has already won the match!"));
        assert!(!text.contains('%'));
    }

    #[test]
    fn probabilities_show_both_teams() {
        let text = render_report(&report(Outcome::Probabilities(PredictionResult {
            win_probability: 39.12,
            loss_probability: 60.88,
        })));
        assert!(text.contains("Rajasthan Royals"));
        assert!(text.contains(" 39.12%"));
        assert!(text.contains("Delhi Capitals"));
        assert!(text.contains(" 60.88%"));
    }
}
