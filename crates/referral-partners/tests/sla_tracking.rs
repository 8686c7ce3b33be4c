use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use referral_partners::workflows::partners::export::{write_crm, write_sla};
use referral_partners::workflows::partners::fixtures::{sample_contacts, sample_practices};
use referral_partners::workflows::partners::{
    build_crm_records, build_sla_records, ContactDirectory, CrmSlaStatus, ScoringEngine,
    SlaStatus, StaticContactDirectory,
};

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 20).expect("valid date")
}

const CONTACT_LOG: &str = "Practice Name,Owner,Last Contact\n\
Sunrise Family Medicine,Jamie Reyes,2025-03-17\n\
Metro Health Associates,Marcus Webb,2025-03-02\n\
Lakewood Medical Group,,2025-02-26\n\
South Bay Family Practice,Priya Shah,\n";

#[test]
fn contact_log_drives_tracker_statuses() {
    let contacts =
        StaticContactDirectory::from_reader(CONTACT_LOG.as_bytes(), as_of()).expect("log parses");
    assert_eq!(contacts.days_since_contact("Sunrise Family Medicine"), Some(3));
    assert_eq!(contacts.days_since_contact("Metro Health Associates"), Some(18));
    assert_eq!(contacts.owner("Lakewood Medical Group"), None);

    let scored = ScoringEngine::default().evaluate_all(&sample_practices());
    let records = build_sla_records(&scored, &contacts);
    let find = |name: &str| {
        records
            .iter()
            .find(|r| r.name == name)
            .expect("record present")
    };

    assert_eq!(find("Sunrise Family Medicine").status, SlaStatus::Urgent);
    assert_eq!(find("Metro Health Associates").days_overdue, 16);

    let lakewood = find("Lakewood Medical Group");
    assert_eq!(lakewood.status, SlaStatus::Overdue);
    assert_eq!(lakewood.owner, "Unassigned");

    let south_bay = find("South Bay Family Practice");
    assert_eq!(south_bay.days_since_contact, 0);
    assert_eq!(south_bay.status, SlaStatus::Monitor);

    assert_eq!(find("Valley Primary Care").status, SlaStatus::OnTrack);
}

#[test]
fn sla_export_marks_missing_thresholds_and_blank_overdue() {
    let scored = ScoringEngine::default().evaluate_all(&sample_practices());
    let records = build_sla_records(&scored, &sample_contacts());
    let mut buffer = Vec::new();
    write_sla(&mut buffer, &records).expect("write succeeds");

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let headers: Vec<String> = reader
        .headers()
        .expect("headers")
        .iter()
        .map(str::to_string)
        .collect();
    assert_eq!(
        headers,
        vec![
            "Status",
            "Practice Name",
            "Practice Type",
            "Location",
            "Tier",
            "Score",
            "Owner",
            "Days Since Contact",
            "SLA (days)",
            "Days Overdue",
            "Recommended Action",
        ]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0].get(0), Some("URGENT - SLA BREACH"));
    assert_eq!(rows[0].get(1), Some("Metro Health Associates"));
    assert_eq!(rows[0].get(9), Some("16"));

    let last = &rows[9];
    assert_eq!(last.get(1), Some("South Bay Family Practice"));
    assert_eq!(last.get(8), Some("N/A"));
    assert_eq!(last.get(9), Some(""));
}

#[test]
fn crm_records_use_their_own_windows() {
    let scored = ScoringEngine::default().evaluate_all(&sample_practices());
    let records = build_crm_records(&scored, &sample_contacts());

    let westside = records
        .iter()
        .find(|r| r.account_name == "Westside Internal Medicine")
        .expect("westside present");
    assert_eq!(westside.sla_status, CrmSlaStatus::AtRisk);
    assert_eq!(westside.sla_days(), 5);

    let mut buffer = Vec::new();
    write_crm(&mut buffer, &records).expect("write succeeds");
    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();

    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0].get(1), Some("Sunrise Family Medicine"));
    assert!(rows[0].get(0).is_some_and(|id| id.starts_with("001Rula001")));
    assert_eq!(rows[9].get(5), Some("Tier 3"));
    assert_eq!(rows[9].get(8), Some("Overdue"));
}
