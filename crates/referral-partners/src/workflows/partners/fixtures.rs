//! Sample prospect list and CRM snapshot used when no input files are given.

use super::contacts::StaticContactDirectory;
use super::domain::{BhReferralGap, Practice};

struct Seed {
    name: &'static str,
    practice_type: &'static str,
    location: &'static str,
    provider_count: u32,
    gap: BhReferralGap,
    networks: &'static [&'static str],
    volume: u32,
    notes: &'static str,
}

impl Seed {
    fn into_practice(self) -> Practice {
        Practice {
            name: self.name.to_string(),
            practice_type: self.practice_type.to_string(),
            location: self.location.to_string(),
            provider_count: self.provider_count,
            bh_referral_gap: self.gap,
            insurance_networks: self.networks.iter().map(|n| n.to_string()).collect(),
            monthly_patient_volume: self.volume,
            notes: self.notes.to_string(),
        }
    }
}

pub fn sample_practices() -> Vec<Practice> {
    vec![
        Seed {
            name: "Sunrise Family Medicine",
            practice_type: "Primary Care",
            location: "Phoenix, AZ",
            provider_count: 14,
            gap: BhReferralGap::Full,
            networks: &[
                "Aetna",
                "Cigna",
                "United Healthcare",
                "Medicare",
                "Blue Cross Blue Shield",
            ],
            volume: 2400,
            notes: "Large suburban group; no on-site therapist; high PHQ-9 screening rates.",
        },
        Seed {
            name: "Metro Health Associates",
            practice_type: "Internal Medicine",
            location: "Chicago, IL",
            provider_count: 22,
            gap: BhReferralGap::Partial,
            networks: &[
                "Aetna",
                "Anthem",
                "Medicare",
                "Medicaid",
                "Cigna",
                "United Healthcare",
                "Humana",
            ],
            volume: 3100,
            notes: "Urban multi-specialty group; 1 social worker for 22 providers, \
                    6-week waitlist.",
        },
        Seed {
            name: "Valley Primary Care",
            practice_type: "Primary Care",
            location: "Fresno, CA",
            provider_count: 4,
            gap: BhReferralGap::Full,
            networks: &["Medicaid", "Medicare", "Molina Healthcare"],
            volume: 620,
            notes: "Rural-serving practice; providers cite BH as biggest unmet patient need.",
        },
        Seed {
            name: "Lakewood Medical Group",
            practice_type: "Primary Care / Urgent Care",
            location: "Denver, CO",
            provider_count: 9,
            gap: BhReferralGap::Partial,
            networks: &[
                "Aetna",
                "Cigna",
                "United Healthcare",
                "Medicare",
                "Centene",
            ],
            volume: 1750,
            notes: "Mixed PCP + urgent care; occasional psych consult but no ongoing BH support.",
        },
        Seed {
            name: "Clearwater Pediatrics",
            practice_type: "Pediatrics",
            location: "Tampa, FL",
            provider_count: 6,
            gap: BhReferralGap::Full,
            networks: &["Medicaid", "Humana", "Cigna", "Blue Cross Blue Shield"],
            volume: 1300,
            notes: "High ADHD and anxiety caseload; average 8-week wait for BH referrals.",
        },
        Seed {
            name: "Northside Community Clinic",
            practice_type: "FQHC",
            location: "Atlanta, GA",
            provider_count: 11,
            gap: BhReferralGap::Partial,
            networks: &[
                "Medicaid",
                "Medicare",
                "Molina Healthcare",
                "Centene",
                "United Healthcare",
            ],
            volume: 2200,
            notes: "Integrated BH model but only 2 counselors for 11 PCPs; chronic shortage.",
        },
        Seed {
            name: "Mountain View OB/GYN",
            practice_type: "OB/GYN",
            location: "Salt Lake City, UT",
            provider_count: 5,
            gap: BhReferralGap::Full,
            networks: &[
                "Aetna",
                "Blue Cross Blue Shield",
                "United Healthcare",
                "Optum",
            ],
            volume: 900,
            notes: "High postpartum depression screening; no current BH referral pathway.",
        },
        Seed {
            name: "South Bay Family Practice",
            practice_type: "Primary Care",
            location: "San Jose, CA",
            provider_count: 2,
            gap: BhReferralGap::None,
            networks: &["Aetna", "Oscar Health", "Medicare"],
            volume: 380,
            notes: "Small 2-physician practice; embedded therapist covers most BH needs.",
        },
        Seed {
            name: "Riverside Health Center",
            practice_type: "Internal Medicine",
            location: "Houston, TX",
            provider_count: 8,
            gap: BhReferralGap::Partial,
            networks: &[
                "United Healthcare",
                "Humana",
                "Medicare",
                "Medicaid",
                "Aetna",
                "Cigna",
            ],
            volume: 1500,
            notes: "Strong network overlap; part-time psychiatrist 1 day/week, overwhelmed.",
        },
        Seed {
            name: "Westside Internal Medicine",
            practice_type: "Internal Medicine",
            location: "Los Angeles, CA",
            provider_count: 7,
            gap: BhReferralGap::Full,
            networks: &[
                "Anthem",
                "Aetna",
                "Cigna",
                "Medicare",
                "Molina Healthcare",
                "Centene",
            ],
            volume: 1100,
            notes: "Diverse patient population; providers rank mental health as top unmet need.",
        },
    ]
    .into_iter()
    .map(Seed::into_practice)
    .collect()
}

/// Owners and days since last touch for the sample list.
pub fn sample_contacts() -> StaticContactDirectory {
    StaticContactDirectory::new()
        .with_contact("Sunrise Family Medicine", "Jamie Reyes", 3)
        .with_contact("Metro Health Associates", "Marcus Webb", 18)
        .with_contact("Valley Primary Care", "Priya Shah", 6)
        .with_contact("Lakewood Medical Group", "Marcus Webb", 22)
        .with_contact("Clearwater Pediatrics", "Dana Okon", 2)
        .with_contact("Northside Community Clinic", "Tyler Brooks", 11)
        .with_contact("Mountain View OB/GYN", "Jamie Reyes", 4)
        .with_contact("South Bay Family Practice", "Priya Shah", 52)
        .with_contact("Riverside Health Center", "Dana Okon", 9)
        .with_contact("Westside Internal Medicine", "Tyler Brooks", 7)
}
