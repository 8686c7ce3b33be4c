use pretty_assertions::assert_eq;
use referral_partners::workflows::partners::export::{
    export_scores, write_crm, write_scores, write_sla, CRM_HEADERS, SCORE_HEADERS, SLA_HEADERS,
};
use referral_partners::workflows::partners::fixtures::sample_practices;
use referral_partners::workflows::partners::{
    import_practices, import_practices_from_path, ScoringEngine, Tier, TierLabel, SCORES_CSV,
};

#[test]
fn sample_practices_score_and_tier_as_expected() {
    let engine = ScoringEngine::default();
    let scored = engine.evaluate_all(&sample_practices());

    let mut actual: Vec<(String, f64, TierLabel)> = scored
        .iter()
        .map(|s| (s.practice.name.clone(), s.score, s.tier))
        .collect();
    actual.sort_by(|a, b| b.1.total_cmp(&a.1));

    let t1 = TierLabel::Tier(Tier::Tier1);
    let t2 = TierLabel::Tier(Tier::Tier2);
    let t3 = TierLabel::Tier(Tier::Tier3);
    let expected = vec![
        ("Sunrise Family Medicine", 80.4, t1),
        ("Metro Health Associates", 74.6, t1),
        ("Westside Internal Medicine", 73.5, t1),
        ("Clearwater Pediatrics", 69.3, t2),
        ("Northside Community Clinic", 65.4, t2),
        ("Mountain View OB/GYN", 60.3, t2),
        ("Riverside Health Center", 58.5, t2),
        ("Valley Primary Care", 58.2, t2),
        ("Lakewood Medical Group", 56.4, t2),
        ("South Bay Family Practice", 19.2, t3),
    ];
    let expected: Vec<(String, f64, TierLabel)> = expected
        .into_iter()
        .map(|(name, score, tier)| (name.to_string(), score, tier))
        .collect();

    assert_eq!(actual, expected);
}

#[test]
fn breakdown_components_stay_within_their_caps() {
    let engine = ScoringEngine::default();
    for s in engine.evaluate_all(&sample_practices()) {
        assert!(s.breakdown.providers <= 25.0, "{}", s.practice.name);
        assert!(s.breakdown.bh_gap <= 35.0, "{}", s.practice.name);
        assert!(s.breakdown.networks <= 25.0, "{}", s.practice.name);
        assert!(s.breakdown.volume <= 15.0, "{}", s.practice.name);
        assert!((0.0..=100.0).contains(&s.score));
    }
}

#[test]
fn score_export_reimports_every_practice_once() {
    let engine = ScoringEngine::default();
    let scored = engine.evaluate_all(&sample_practices());
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(SCORES_CSV);

    export_scores(&path, &scored).expect("export succeeds");
    let reimported = import_practices_from_path(&path).expect("reimport succeeds");
    assert_eq!(reimported.len(), scored.len());

    for original in &scored {
        let matches: Vec<_> = reimported
            .iter()
            .filter(|p| p.name == original.practice.name)
            .collect();
        assert_eq!(matches.len(), 1, "{} appears once", original.practice.name);
        let rescored = engine.evaluate(matches[0]);
        assert_eq!(rescored.score, original.score);
        assert_eq!(rescored.tier, original.tier);
    }
}

#[derive(Debug, serde::Deserialize)]
struct ExportedScore {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Score")]
    score: f64,
    #[serde(rename = "Providers (pts)")]
    providers: f64,
    #[serde(rename = "BH Gap (pts)")]
    bh_gap: f64,
    #[serde(rename = "Networks (pts)")]
    networks: f64,
    #[serde(rename = "Volume (pts)")]
    volume: f64,
}

#[test]
fn exported_score_columns_match_computed_scores() {
    let scored = ScoringEngine::default().evaluate_all(&sample_practices());
    let mut buffer = Vec::new();
    write_scores(&mut buffer, &scored).expect("write succeeds");

    let rows: Vec<ExportedScore> = csv::Reader::from_reader(buffer.as_slice())
        .deserialize()
        .map(|row| row.expect("row deserializes"))
        .collect();
    assert_eq!(rows.len(), scored.len());

    for s in &scored {
        let matches: Vec<&ExportedScore> =
            rows.iter().filter(|r| r.name == s.practice.name).collect();
        assert_eq!(matches.len(), 1, "{} exported once", s.practice.name);
        let row = matches[0];
        assert_eq!(row.score, s.score, "{}", s.practice.name);
        assert_eq!(row.providers, s.breakdown.providers);
        assert_eq!(row.bh_gap, s.breakdown.bh_gap);
        assert_eq!(row.networks, s.breakdown.networks);
        assert_eq!(row.volume, s.breakdown.volume);
    }
}

#[test]
fn score_export_is_ordered_by_tier_then_score() {
    let scored = ScoringEngine::default().evaluate_all(&sample_practices());
    let mut buffer = Vec::new();
    write_scores(&mut buffer, &scored).expect("write succeeds");

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(headers.get(0), Some("Rank"));
    assert_eq!(headers.get(1), Some("Tier"));
    assert_eq!(headers.len(), 16);

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    let names: Vec<&str> = rows.iter().filter_map(|r| r.get(2)).collect();
    assert_eq!(names[0], "Sunrise Family Medicine");
    assert_eq!(names[3], "Clearwater Pediatrics");
    assert_eq!(names[9], "South Bay Family Practice");
    assert_eq!(rows[0].get(1), Some("Tier 1 - High Priority   (score >= 70)"));
    assert_eq!(rows[0].get(0), Some("1"));
}

#[test]
fn empty_exports_still_carry_a_header_row() {
    let mut scores = Vec::new();
    write_scores(&mut scores, &[]).expect("write succeeds");
    let text = String::from_utf8(scores.clone()).expect("utf8");
    assert_eq!(text.trim_end(), SCORE_HEADERS.join(","));
    assert!(text.starts_with("Rank,Tier,Name"));
    assert!(import_practices(scores.as_slice())
        .expect("header-only import")
        .is_empty());

    let mut sla = Vec::new();
    write_sla(&mut sla, &[]).expect("write succeeds");
    assert_eq!(
        String::from_utf8(sla).expect("utf8").trim_end(),
        SLA_HEADERS.join(",")
    );

    let mut crm = Vec::new();
    write_crm(&mut crm, &[]).expect("write succeeds");
    assert_eq!(
        String::from_utf8(crm).expect("utf8").trim_end(),
        CRM_HEADERS.join(",")
    );
}
