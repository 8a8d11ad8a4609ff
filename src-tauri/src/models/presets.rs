use crate::models::fields::{FieldKey, FieldRecord};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Positive,
    Negative,
}

impl Preset {
    pub fn record(self) -> FieldRecord {
        match self {
            Preset::Positive => FieldRecord::from_pairs(POSITIVE_SAMPLE),
            Preset::Negative => FieldRecord::from_pairs(NEGATIVE_SAMPLE),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Preset::Positive => "Positive",
            Preset::Negative => "Negative",
        }
    }

    pub fn profile(self) -> &'static str {
        match self {
            Preset::Positive => "low risk",
            Preset::Negative => "high risk",
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Preset::Positive),
            "negative" => Ok(Preset::Negative),
            other => Err(format!(
                "UNKNOWN_PRESET: `{other}` (expected `positive` or `negative`)"
            )),
        }
    }
}

/// Established borrower: steady income, repayments ahead of schedule, no rejections.
const POSITIVE_SAMPLE: &[(FieldKey, f64)] = &[
    (FieldKey::AmtInstPaidBefDue24m, 185000.0),
    (FieldKey::Annuity, 3200.0),
    (FieldKey::AnnuityNextMonth, 3200.0),
    (FieldKey::AvgInstLast24m, 2850.0),
    (FieldKey::AvgLoanAmtStart24m, 42000.0),
    (FieldKey::AvgOutstandBalance6m, 15400.0),
    (FieldKey::AvgPmtLast12m, 3100.0),
    (FieldKey::CredAmount, 60000.0),
    (FieldKey::CurrDebt, 12000.0),
    (FieldKey::CurrDebtCredTypeRange, 12000.0),
    (FieldKey::DisbursedCredAmount, 60000.0),
    (FieldKey::DownPmt, 6000.0),
    (FieldKey::InitTransactionAmount, 0.0),
    (FieldKey::LastApprCommodityCat, 12.0),
    (FieldKey::LastApprCommodityType, 4.0),
    (FieldKey::LastApprCredAmount, 48000.0),
    (FieldKey::LastCancelReason, 0.0),
    (FieldKey::LastOtherInc, 0.0),
    (FieldKey::LastOtherLnsExpense, 0.0),
    (FieldKey::LastRejectCommodityCat, 0.0),
    (FieldKey::LastRejectCommodityType, 0.0),
    (FieldKey::LastRejectCredAmount, 0.0),
    (FieldKey::LastRejectReason, 0.0),
    (FieldKey::LastRejectReasonClient, 0.0),
    (FieldKey::MainInc, 95000.0),
    (FieldKey::MaxAnnuity, 4100.0),
    (FieldKey::MaxAnnuityAlt, 4100.0),
    (FieldKey::MaxDebt4, 22000.0),
    (FieldKey::MaxInstLast24m, 3900.0),
    (FieldKey::MaxLoanAmtStart6m, 0.0),
    (FieldKey::MaxOutstandBalance12m, 28000.0),
    (FieldKey::MaxPmtLast3m, 3300.0),
    (FieldKey::PreviousContDistrict, 141.0),
    (FieldKey::Price, 62000.0),
    (FieldKey::SumOutstandTotal, 12000.0),
    (FieldKey::SumOutstandTotalEst, 12500.0),
    (FieldKey::TotalDebt, 12000.0),
    (FieldKey::TotalSettled, 240000.0),
    (FieldKey::TotInstLast1m, 3200.0),
    (FieldKey::Description, 0.0),
    (FieldKey::Education, 2.0),
    (FieldKey::EducationAlt, 2.0),
    (FieldKey::MaritalStatus, 1.0),
    (FieldKey::MaritalStatusAlt, 1.0),
    (FieldKey::PmtAverage, 3150.0),
    (FieldKey::PmtAverageAlt, 3080.0),
    (FieldKey::PmtAverageAlt2, 3010.0),
    (FieldKey::PmtsSum, 37800.0),
];

/// Over-leveraged applicant: low income, large outstanding balances, recent rejections.
const NEGATIVE_SAMPLE: &[(FieldKey, f64)] = &[
    (FieldKey::AmtInstPaidBefDue24m, 1200.0),
    (FieldKey::Annuity, 9800.0),
    (FieldKey::AnnuityNextMonth, 9800.0),
    (FieldKey::AvgInstLast24m, 7400.0),
    (FieldKey::AvgLoanAmtStart24m, 180000.0),
    (FieldKey::AvgOutstandBalance6m, 165000.0),
    (FieldKey::AvgPmtLast12m, 2100.0),
    (FieldKey::CredAmount, 250000.0),
    (FieldKey::CurrDebt, 210000.0),
    (FieldKey::CurrDebtCredTypeRange, 210000.0),
    (FieldKey::DisbursedCredAmount, 250000.0),
    (FieldKey::DownPmt, 0.0),
    (FieldKey::InitTransactionAmount, 15000.0),
    (FieldKey::LastApprCommodityCat, 7.0),
    (FieldKey::LastApprCommodityType, 9.0),
    (FieldKey::LastApprCredAmount, 120000.0),
    (FieldKey::LastCancelReason, 3.0),
    (FieldKey::LastOtherInc, 0.0),
    (FieldKey::LastOtherLnsExpense, 4500.0),
    (FieldKey::LastRejectCommodityCat, 7.0),
    (FieldKey::LastRejectCommodityType, 9.0),
    (FieldKey::LastRejectCredAmount, 300000.0),
    (FieldKey::LastRejectReason, 5.0),
    (FieldKey::LastRejectReasonClient, 2.0),
    (FieldKey::MainInc, 18000.0),
    (FieldKey::MaxAnnuity, 12500.0),
    (FieldKey::MaxAnnuityAlt, 12500.0),
    (FieldKey::MaxDebt4, 240000.0),
    (FieldKey::MaxInstLast24m, 11800.0),
    (FieldKey::MaxLoanAmtStart6m, 150000.0),
    (FieldKey::MaxOutstandBalance12m, 230000.0),
    (FieldKey::MaxPmtLast3m, 2200.0),
    (FieldKey::PreviousContDistrict, 58.0),
    (FieldKey::Price, 255000.0),
    (FieldKey::SumOutstandTotal, 220000.0),
    (FieldKey::SumOutstandTotalEst, 226000.0),
    (FieldKey::TotalDebt, 235000.0),
    (FieldKey::TotalSettled, 8000.0),
    (FieldKey::TotInstLast1m, 9600.0),
    (FieldKey::Description, 1.0),
    (FieldKey::Education, 4.0),
    (FieldKey::EducationAlt, 4.0),
    (FieldKey::MaritalStatus, 3.0),
    (FieldKey::MaritalStatusAlt, 3.0),
    (FieldKey::PmtAverage, 1850.0),
    (FieldKey::PmtAverageAlt, 1700.0),
    (FieldKey::PmtAverageAlt2, 1600.0),
    (FieldKey::PmtsSum, 6200.0),
];
