/*!
Scoring and positioning of consulting firms.

A [`Roster`] holds firms scored from 1 to 10 on three axes: the nature of the
offering, the value proposition and the SME focus. Everything else is derived
on read from these raw scores:

* a one-sentence narrative ([`explain`]),
* a white-space score ([`white_space_score`]) and its label ([`classify`]),
* two strategic differentiators for the whole roster ([`recommend`]).

```
use firm_positioning::*;

let roster = Roster::from_drafts(&[
    FirmDraft::new("Alpha", 9, 9, 9),
    FirmDraft::new("Beta", 2, 2, 2),
])?;

let ranking = white_space_ranking(&roster);
assert_eq!(ranking[0].name, "Alpha");
assert_eq!(ranking[0].white_space_score.to_string(), "8.9");
assert_eq!(ranking[0].opportunity_label, OpportunityLabel::VeryHigh);

# Ok::<(), LoadError>(())
```
*/

mod config;
mod roster;
pub mod builder;
pub mod manual;

use log::{debug, info};

pub use crate::config::*;
pub use crate::roster::Roster;

/// Maps a score to its qualitative intensity.
///
/// The thresholds are checked from the top: 8 and above is high, 6 and above
/// is moderate, 4 and above is mid, anything lower is low.
pub fn bucket(x: f64) -> Bucket {
    if x >= 8.0 {
        Bucket::High
    } else if x >= 6.0 {
        Bucket::Moderate
    } else if x >= 4.0 {
        Bucket::Mid
    } else {
        Bucket::Low
    }
}

// Moderate and mid share the same clause on every axis.
fn offering_clause(b: Bucket) -> &'static str {
    match b {
        Bucket::High => "holistic, end-to-end advisory",
        Bucket::Moderate | Bucket::Mid => "balanced multi-functional advisory",
        Bucket::Low => "specialist functional consulting",
    }
}

fn value_clause(b: Bucket) -> &'static str {
    match b {
        Bucket::High => "innovation-led transformation",
        Bucket::Moderate | Bucket::Mid => "balanced cost & improvement focus",
        Bucket::Low => "cost-efficiency oriented",
    }
}

fn sme_clause(b: Bucket) -> &'static str {
    match b {
        Bucket::High => "with strong SME engagement.",
        Bucket::Moderate | Bucket::Mid => "with selective SME reach.",
        Bucket::Low => "with limited SME focus.",
    }
}

/// Describes a firm in one sentence from its three scores.
///
/// This is a fixed template, the same inputs always give the same text.
pub fn explain(offering_nature: f64, value_proposition: f64, sme_focus: f64) -> String {
    format!(
        "{}, {} {}",
        offering_clause(bucket(offering_nature)),
        value_clause(bucket(value_proposition)),
        sme_clause(bucket(sme_focus))
    )
}

/// Computes `(offering_nature + value_proposition) / 2 - (10 - sme_focus) * 0.1`.
///
/// Ambitious firms score higher, and every point of SME focus below 10 costs 0.1.
pub fn white_space_score(
    offering_nature: Score,
    value_proposition: Score,
    sme_focus: Score,
) -> WhiteSpaceScore {
    let on = offering_nature.value() as i32;
    let vp = value_proposition.value() as i32;
    let sme = sme_focus.value() as i32;
    // In tenths: (on + vp) / 2 * 10 - (10 - sme) * 0.1 * 10
    WhiteSpaceScore(5 * (on + vp) - (10 - sme))
}

/// Labels a white-space score.
pub fn classify(score: f64) -> OpportunityLabel {
    if score >= 7.5 {
        OpportunityLabel::VeryHigh
    } else if score >= 6.0 {
        OpportunityLabel::High
    } else if score >= 4.5 {
        OpportunityLabel::Moderate
    } else {
        OpportunityLabel::Low
    }
}

/// All the derived fields of one firm.
pub fn analyze(firm: &Firm) -> FirmAnalysis {
    let score = white_space_score(firm.offering_nature, firm.value_proposition, firm.sme_focus);
    FirmAnalysis {
        id: firm.id,
        name: firm.name.clone(),
        offering_nature: firm.offering_nature,
        value_proposition: firm.value_proposition,
        sme_focus: firm.sme_focus,
        narrative: explain(
            firm.offering_nature.into(),
            firm.value_proposition.into(),
            firm.sme_focus.into(),
        ),
        white_space_score: score,
        opportunity_label: classify(score.value()),
    }
}

/// The analysis of every firm, in roster order.
pub fn analyze_roster(roster: &Roster) -> Vec<FirmAnalysis> {
    roster.firms().iter().map(analyze).collect()
}

/// The firms sorted by decreasing white-space score.
///
/// Firms with the same score stay in roster order.
pub fn white_space_ranking(roster: &Roster) -> Vec<FirmAnalysis> {
    let mut res = analyze_roster(roster);
    res.sort_by(|a, b| b.white_space_score.cmp(&a.white_space_score));
    res
}

/// The markers of the positioning map: offering nature on x, value proposition
/// on y, SME focus as the marker size.
pub fn positioning_map(roster: &Roster) -> Vec<MapPoint> {
    roster
        .firms()
        .iter()
        .map(|f| MapPoint {
            id: f.id,
            name: f.name.clone(),
            x: f.offering_nature.value(),
            y: f.value_proposition.value(),
            size: f.sme_focus.value(),
            hover: explain(
                f.offering_nature.into(),
                f.value_proposition.into(),
                f.sme_focus.into(),
            ),
        })
        .collect()
}

// Number of firms strictly above and strictly below the mean of one axis.
// The comparison with the mean is done as x * n against the sum to stay exact.
fn count_around_mean(firms: &[Firm], field: ScoreField) -> (usize, usize) {
    let n = firms.len() as u64;
    let sum: u64 = firms.iter().map(|f| f.score(field).value() as u64).sum();
    let above = firms
        .iter()
        .filter(|f| f.score(field).value() as u64 * n > sum)
        .count();
    let below = firms
        .iter()
        .filter(|f| (f.score(field).value() as u64 * n) < sum)
        .count();
    (above, below)
}

/// Suggests two differentiators for a new entrant, looking at the whole roster.
///
/// The first one is the pricing rule: if at least half of the firms have an
/// above-average value proposition and at least a third of them have a
/// below-average SME focus, outcome-linked pricing is suggested, otherwise an
/// SME strategy studio.
///
/// The second one is the packaging rule: if at least a third of the firms have a
/// below-average offering nature, holistic bundles are suggested, otherwise
/// sector playbooks.
///
/// The fractions use integer division on the number of firms.
pub fn recommend(firms: &[Firm]) -> Result<[Differentiator; 2], AnalysisError> {
    if firms.is_empty() {
        return Err(AnalysisError::EmptyRoster);
    }
    let n = firms.len();
    let (count_high_value, _) = count_around_mean(firms, ScoreField::ValueProposition);
    let (_, count_low_sme) = count_around_mean(firms, ScoreField::SmeFocus);
    let (_, count_low_offering) = count_around_mean(firms, ScoreField::OfferingNature);
    debug!(
        "recommend: n: {} high value: {} low sme: {} low offering: {}",
        n, count_high_value, count_low_sme, count_low_offering
    );

    let pricing = if count_high_value >= n / 2 && count_low_sme >= n / 3 {
        Differentiator::OutcomeLinkedPricing
    } else {
        Differentiator::SmeStrategyStudio
    };
    let packaging = if count_low_offering >= n / 3 {
        Differentiator::HolisticTransformationBundles
    } else {
        Differentiator::SectorPlaybooks
    };
    info!("Differentiators: {:?} {:?}", pricing, packaging);
    Ok([pricing, packaging])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn s(x: i64) -> Score {
        Score::new(ScoreField::OfferingNature, x).unwrap()
    }

    fn roster(drafts: &[(&str, i64, i64, i64)]) -> Roster {
        let ds: Vec<FirmDraft> = drafts
            .iter()
            .map(|(name, on, vp, sme)| FirmDraft::new(name, *on, *vp, *sme))
            .collect();
        Roster::from_drafts(&ds).unwrap()
    }

    #[test]
    fn bucket_boundaries() {
        assert_eq!(bucket(10.0), Bucket::High);
        assert_eq!(bucket(8.0), Bucket::High);
        assert_eq!(bucket(7.999), Bucket::Moderate);
        assert_eq!(bucket(6.0), Bucket::Moderate);
        assert_eq!(bucket(5.999), Bucket::Mid);
        assert_eq!(bucket(4.0), Bucket::Mid);
        assert_eq!(bucket(3.999), Bucket::Low);
        assert_eq!(bucket(1.0), Bucket::Low);
    }

    #[test]
    fn bucket_is_monotonic() {
        let mut prev = bucket(1.0);
        for x in 1..=10 {
            let b = bucket(x as f64);
            assert!(b >= prev, "{} gave {:?} after {:?}", x, b, prev);
            prev = b;
        }
    }

    #[test]
    fn explain_high_scores() {
        assert_eq!(
            explain(9.0, 9.0, 9.0),
            "holistic, end-to-end advisory, innovation-led transformation with strong SME engagement."
        );
    }

    #[test]
    fn explain_low_scores() {
        assert_eq!(
            explain(3.0, 3.0, 3.0),
            "specialist functional consulting, cost-efficiency oriented with limited SME focus."
        );
    }

    #[test]
    fn explain_mid_and_moderate_share_clauses() {
        let expected =
            "balanced multi-functional advisory, balanced cost & improvement focus with selective SME reach.";
        assert_eq!(explain(5.0, 4.0, 7.0), expected);
        assert_eq!(explain(7.0, 6.0, 4.0), expected);
    }

    #[test]
    fn explain_is_deterministic() {
        for x in 1..=10 {
            let (a, b, c) = (x as f64, (11 - x) as f64, ((x * 3) % 10 + 1) as f64);
            assert_eq!(explain(a, b, c), explain(a, b, c));
        }
    }

    #[test]
    fn white_space_scenarios() {
        let alpha = white_space_score(s(9), s(9), s(9));
        assert_eq!(alpha.tenths(), 89);
        assert_eq!(alpha.to_string(), "8.9");
        assert_eq!(classify(alpha.value()), OpportunityLabel::VeryHigh);

        let beta = white_space_score(s(2), s(2), s(2));
        assert_eq!(beta.to_string(), "1.2");
        assert_eq!(classify(beta.value()), OpportunityLabel::Low);
    }

    #[test]
    fn white_space_range() {
        assert_eq!(white_space_score(s(1), s(1), s(1)).to_string(), "0.1");
        assert_eq!(white_space_score(s(10), s(10), s(10)).to_string(), "10.0");
    }

    #[test]
    fn white_space_is_monotonic_in_each_input() {
        for a in 1..=10 {
            for b in 1..=10 {
                for x in 1..10 {
                    let lo = s(x);
                    let hi = s(x + 1);
                    assert!(white_space_score(hi, s(a), s(b)) >= white_space_score(lo, s(a), s(b)));
                    assert!(white_space_score(s(a), hi, s(b)) >= white_space_score(s(a), lo, s(b)));
                    assert!(white_space_score(s(a), s(b), hi) >= white_space_score(s(a), s(b), lo));
                }
            }
        }
    }

    #[test]
    fn classify_boundaries() {
        assert_eq!(classify(7.5), OpportunityLabel::VeryHigh);
        assert_eq!(classify(7.4), OpportunityLabel::High);
        assert_eq!(classify(6.0), OpportunityLabel::High);
        assert_eq!(classify(5.9), OpportunityLabel::Moderate);
        assert_eq!(classify(4.5), OpportunityLabel::Moderate);
        assert_eq!(classify(4.4), OpportunityLabel::Low);
        assert_eq!(OpportunityLabel::High.to_string(), "High opportunity");
    }

    #[test]
    fn ranking_is_sorted_and_stable() {
        init();
        let r = roster(&[
            ("Low", 2, 2, 2),
            ("TieA", 6, 6, 6),
            ("Top", 9, 9, 9),
            ("TieB", 6, 6, 6),
        ]);
        let names: Vec<String> = white_space_ranking(&r).into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Top", "TieA", "TieB", "Low"]);
    }

    #[test]
    fn empty_roster() {
        let r = Roster::new();
        assert!(white_space_ranking(&r).is_empty());
        assert!(positioning_map(&r).is_empty());
        assert_eq!(recommend(r.firms()), Err(AnalysisError::EmptyRoster));
    }

    #[test]
    fn analysis_follows_edits() {
        let mut r = roster(&[("Beta", 2, 2, 2)]);
        assert_eq!(analyze_roster(&r)[0].opportunity_label, OpportunityLabel::Low);
        r.update(FirmId(1), FirmUpdate::Score(ScoreField::OfferingNature, 10))
            .unwrap();
        r.update(FirmId(1), FirmUpdate::Score(ScoreField::ValueProposition, 10))
            .unwrap();
        let a = &analyze_roster(&r)[0];
        assert_eq!(a.white_space_score.to_string(), "9.2");
        assert_eq!(a.opportunity_label, OpportunityLabel::VeryHigh);
        assert_eq!(
            a.narrative,
            "holistic, end-to-end advisory, innovation-led transformation with limited SME focus."
        );
    }

    #[test]
    fn map_points() {
        let r = roster(&[("Alpha", 9, 3, 7)]);
        let points = positioning_map(&r);
        assert_eq!(points.len(), 1);
        assert_eq!((points[0].x, points[0].y, points[0].size), (9, 3, 7));
        assert_eq!(points[0].hover, explain(9.0, 3.0, 7.0));
    }

    #[test]
    fn recommend_pricing_and_bundles() {
        init();
        // value mean 5.5: 2 above >= 4/2; sme mean 5.5: 2 below >= 4/3;
        // offering mean 5.5: 2 below >= 4/3
        let r = roster(&[
            ("A", 2, 9, 2),
            ("B", 3, 8, 3),
            ("C", 8, 2, 8),
            ("D", 9, 3, 9),
        ]);
        assert_eq!(
            recommend(r.firms()),
            Ok([
                Differentiator::OutcomeLinkedPricing,
                Differentiator::HolisticTransformationBundles
            ])
        );
    }

    #[test]
    fn recommend_studio_and_playbooks() {
        // value mean 7.5: only 1 above < 4/2
        // offering mean 7: nobody below < 4/3
        let r = roster(&[
            ("A", 7, 7, 5),
            ("B", 7, 7, 5),
            ("C", 7, 7, 5),
            ("D", 7, 9, 5),
        ]);
        assert_eq!(
            recommend(r.firms()),
            Ok([
                Differentiator::SmeStrategyStudio,
                Differentiator::SectorPlaybooks
            ])
        );
    }

    #[test]
    fn recommend_single_firm() {
        // With one firm every threshold is 0, so both rules fire.
        let r = roster(&[("Solo", 5, 5, 5)]);
        assert_eq!(
            recommend(r.firms()),
            Ok([
                Differentiator::OutcomeLinkedPricing,
                Differentiator::HolisticTransformationBundles
            ])
        );
    }
}
