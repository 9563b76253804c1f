//! Plain-text console report.

use std::fmt;

use crate::analysis::page::PageAnalysis;
use crate::analysis::summary::AnalysisSummary;
use crate::color::cmyk::Channel;
use crate::compliance::ComplianceStatus;

const RULE_WIDTH: usize = 80;

/// Console report over page results and their summary.
pub struct Report<'a> {
    pub title: &'a str,
    pub pages: &'a [PageAnalysis],
    pub summary: &'a AnalysisSummary,
}

/// Render the report as a string.
pub fn render_text(title: &str, pages: &[PageAnalysis], summary: &AnalysisSummary) -> String {
    Report { title, pages, summary }.to_string()
}

fn channel_heading(channel: Channel) -> &'static str {
    match channel {
        Channel::Cyan => "Cyan (C):   ",
        Channel::Magenta => "Magenta (M):",
        Channel::Yellow => "Yellow (Y): ",
        Channel::Black => "Black (K):  ",
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        writeln!(f, "{heavy}")?;
        writeln!(f, "Ink Coverage Analysis: {}", self.title)?;
        writeln!(f, "{heavy}")?;

        for page in self.pages {
            writeln!(f)?;
            writeln!(f, "Page {}:", page.page)?;
            for channel in Channel::ALL {
                writeln!(f, "  {} {:6.2}%", channel_heading(channel), page.channel_mean(channel))?;
            }
            writeln!(f, "  TAC Average: {:6.2}%", page.tac.mean)?;
            writeln!(f, "  TAC Maximum: {:6.2}%  (p95 {:.2}%)", page.tac.max, page.tac.p95)?;

            let verdict = &page.compliance;
            match verdict.status {
                ComplianceStatus::Compliant => {}
                ComplianceStatus::Caution => writeln!(
                    f,
                    "  CAUTION: TAC above {:.0}% warning threshold ({})",
                    verdict.warning_threshold, verdict.process
                )?,
                ComplianceStatus::Exceeds => writeln!(
                    f,
                    "  WARNING: TAC exceeds {:.0}% limit ({})",
                    verdict.limit, verdict.process
                )?,
            }

            if let Some(ink) = &page.ink {
                writeln!(f, "  Ink ({}): {:.4} mL", ink.profile, ink.total_ml)?;
            }
        }

        let s = self.summary;
        writeln!(f)?;
        writeln!(f, "{light}")?;
        writeln!(f, "Overall Summary:")?;
        writeln!(f, "{light}")?;
        writeln!(f, "Total Pages:           {}", s.total_pages)?;
        writeln!(f, "Copies:                {}", s.copies)?;
        for channel in Channel::ALL {
            let label = format!("{} Average:", capitalize(channel.label()));
            writeln!(f, "{label:<22} {:6.2}%", s.channels.get(channel).mean)?;
        }
        writeln!(f, "TAC Average Overall:   {:6.2}%", s.tac.mean)?;
        writeln!(f, "TAC Maximum Overall:   {:6.2}%", s.tac.max)?;
        writeln!(
            f,
            "Compliance:            {} compliant, {} caution, {} exceeding",
            s.compliance.compliant, s.compliance.caution, s.compliance.exceeds
        )?;
        writeln!(f, "Pages exceeding 280%:  {}", s.legacy.pages_exceeding_280)?;
        writeln!(f, "Pages exceeding 300%:  {}", s.legacy.pages_exceeding_300)?;
        writeln!(f, "Pages exceeding 320%:  {}", s.legacy.pages_exceeding_320)?;

        if let Some(ink) = &s.ink {
            writeln!(f, "Ink for {} copies ({}):", s.copies, ink.profile)?;
            for channel in Channel::ALL {
                writeln!(f, "  {:<8} {:10.4} mL", channel.label(), ink.get(channel))?;
            }
            writeln!(f, "  {:<8} {:10.4} mL", "total", ink.total_ml)?;
        }

        if let Some(cost) = &s.cost {
            writeln!(f, "Cartridges for {} copies:", s.copies)?;
            for channel in Channel::ALL {
                let c = cost.get(channel);
                writeln!(f, "  {:<8} {:8.4} cartridges  {:10.2}", channel.label(), c.cartridges, c.cost)?;
            }
            writeln!(f, "  Total cost: {:.2}", cost.total_cost)?;
        }

        writeln!(f, "{heavy}")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::Analyzer;
    use crate::analysis::config::AnalyzerConfig;
    use crate::cost::{CartridgeConfig, CartridgeSpec};
    use crate::raster::Raster;

    fn cartridges() -> CartridgeConfig {
        CartridgeConfig {
            cyan: CartridgeSpec::new(200.0, 25.0),
            magenta: CartridgeSpec::new(200.0, 25.0),
            yellow: CartridgeSpec::new(200.0, 25.0),
            black: CartridgeSpec::new(400.0, 30.0),
        }
    }

    #[test]
    fn test_report_mentions_every_page_and_summary() {
        let mut analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
        analyzer.analyze_page(&Raster::filled(4, 4, [255, 0, 0]));
        analyzer.analyze_page(&Raster::filled(4, 4, [0, 0, 0]));
        let summary = analyzer.summary(1).unwrap();

        let text = render_text("doc.pdf", analyzer.pages(), &summary);
        assert!(text.contains("Ink Coverage Analysis: doc.pdf"));
        assert!(text.contains("Page 1:"));
        assert!(text.contains("Page 2:"));
        assert!(text.contains("Magenta Average:"));
        assert!(text.contains("Pages exceeding 320%:  0"));
        assert!(!text.contains("Total cost"));
    }

    #[test]
    fn test_report_includes_ink_and_cost_when_configured() {
        let config = AnalyzerConfig {
            printer_profile: Some("inkjet_standard".to_string()),
            ..AnalyzerConfig::default()
        };
        let mut analyzer = Analyzer::new(config).unwrap().with_cartridges(cartridges()).unwrap();
        analyzer.analyze_page(&Raster::filled(4, 4, [0, 0, 0]));
        let summary = analyzer.summary(100).unwrap();

        let text = render_text("doc.pdf", analyzer.pages(), &summary);
        assert!(text.contains("Ink for 100 copies (inkjet_standard):"));
        assert!(text.contains("Total cost: 45.00"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("magenta"), "Magenta");
        assert_eq!(capitalize(""), "");
    }
}
