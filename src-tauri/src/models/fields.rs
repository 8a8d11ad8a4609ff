use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! credit_fields {
    ($( $variant:ident => $key:literal, $label:literal; )+) => {
        /// Applicant attributes accepted by the scoring service, in wire order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum FieldKey {
            $( $variant, )+
        }

        impl FieldKey {
            pub const ALL: &'static [FieldKey] = &[ $( FieldKey::$variant, )+ ];

            /// Key as sent to the scoring service.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( FieldKey::$variant => $key, )+
                }
            }

            /// Human-readable label shown next to the input.
            pub fn label(self) -> &'static str {
                match self {
                    $( FieldKey::$variant => $label, )+
                }
            }
        }
    };
}

credit_fields! {
    AmtInstPaidBefDue24m => "amtinstpaidbefduel24m_4187115A", "Amount Installment Paid Before Due (24M)";
    Annuity => "annuity_780A", "Annuity";
    AnnuityNextMonth => "annuitynextmonth_57A", "Annuity Next Month";
    AvgInstLast24m => "avginstallast24m_3658937A", "Average Installments Last 24M";
    AvgLoanAmtStart24m => "avglnamtstart24m_4525187A", "Average Loan Amount Start 24M";
    AvgOutstandBalance6m => "avgoutstandbalancel6m_4187114A", "Average Outstanding Balance Last 6M";
    AvgPmtLast12m => "avgpmtlast12m_4525200A", "Average Payment Last 12M";
    CredAmount => "credamount_770A", "Credit Amount";
    CurrDebt => "currdebt_22A", "Current Debt";
    CurrDebtCredTypeRange => "currdebtcredtyperange_828A", "Current Debt Credit Type Range";
    DisbursedCredAmount => "disbursedcredamount_1113A", "Disbursed Credit Amount";
    DownPmt => "downpmt_116A", "Down Payment";
    InitTransactionAmount => "inittransactionamount_650A", "Initial Transaction Amount";
    LastApprCommodityCat => "lastapprcommoditycat_1041M", "Last Approved Commodity Category";
    LastApprCommodityType => "lastapprcommoditytypec_5251766M", "Last Approved Commodity Type";
    LastApprCredAmount => "lastapprcredamount_781A", "Last Approved Credit Amount";
    LastCancelReason => "lastcancelreason_561M", "Last Cancel Reason";
    LastOtherInc => "lastotherinc_902A", "Last Other Income";
    LastOtherLnsExpense => "lastotherlnsexpense_631A", "Last Other Loan Expense";
    LastRejectCommodityCat => "lastrejectcommoditycat_161M", "Last Reject Commodity Category";
    LastRejectCommodityType => "lastrejectcommodtypec_5251769M", "Last Reject Commodity Type";
    LastRejectCredAmount => "lastrejectcredamount_222A", "Last Reject Credit Amount";
    LastRejectReason => "lastrejectreason_759M", "Last Reject Reason";
    LastRejectReasonClient => "lastrejectreasonclient_4145040M", "Last Reject Reason Client";
    MainInc => "maininc_215A", "Main Income";
    MaxAnnuity => "maxannuity_159A", "Max Annuity";
    MaxAnnuityAlt => "maxannuity_4075009A", "Max Annuity Alt";
    MaxDebt4 => "maxdebt4_972A", "Max Debt 4";
    MaxInstLast24m => "maxinstallast24m_3658928A", "Max Installments Last 24M";
    MaxLoanAmtStart6m => "maxlnamtstart6m_4525199A", "Max Loan Amount Start 6M";
    MaxOutstandBalance12m => "maxoutstandbalancel12m_4187113A", "Max Outstanding Balance Last 12M";
    MaxPmtLast3m => "maxpmtlast3m_4525190A", "Max Payment Last 3M";
    PreviousContDistrict => "previouscontdistrict_112M", "Previous Contract District";
    Price => "price_1097A", "Price";
    SumOutstandTotal => "sumoutstandtotal_3546847A", "Sum Outstanding Total";
    SumOutstandTotalEst => "sumoutstandtotalest_4493215A", "Sum Outstanding Total Estimated";
    TotalDebt => "totaldebt_9A", "Total Debt";
    TotalSettled => "totalsettled_863A", "Total Settled";
    TotInstLast1m => "totinstallast1m_4525188A", "Total Installments Last 1M";
    Description => "description_5085714M", "Description";
    Education => "education_1103M", "Education";
    EducationAlt => "education_88M", "Education Alt";
    MaritalStatus => "maritalst_385M", "Marital Status";
    MaritalStatusAlt => "maritalst_893M", "Marital Status Alt";
    PmtAverage => "pmtaverage_3A", "Payment Average";
    PmtAverageAlt => "pmtaverage_4527227A", "Payment Average Alt";
    PmtAverageAlt2 => "pmtaverage_4955615A", "Payment Average Alt 2";
    PmtsSum => "pmtssum_45A", "Payments Sum";
}

pub const FIELD_COUNT: usize = FieldKey::ALL.len();

impl FieldKey {
    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("UNKNOWN_FIELD: `{s}` is not an applicant attribute"))
    }
}

impl Serialize for FieldKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub key: FieldKey,
    pub label: String,
}

pub fn field_descriptors() -> Vec<FieldDescriptor> {
    FieldKey::ALL
        .iter()
        .map(|key| FieldDescriptor {
            key: *key,
            label: key.label().to_string(),
        })
        .collect()
}

/// One value per [`FieldKey`]; every key is always present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRecord {
    values: [f64; FIELD_COUNT],
}

impl Default for FieldRecord {
    fn default() -> Self {
        Self {
            values: [0.0; FIELD_COUNT],
        }
    }
}

impl FieldRecord {
    pub fn get(&self, key: FieldKey) -> f64 {
        self.values[key.index()]
    }

    pub fn set(&mut self, key: FieldKey, value: f64) {
        self.values[key.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, f64)> + '_ {
        FieldKey::ALL.iter().map(move |key| (*key, self.get(*key)))
    }

    /// Builds a record from explicit pairs; unlisted keys stay at zero.
    pub fn from_pairs(pairs: &[(FieldKey, f64)]) -> Self {
        let mut record = Self::default();
        for (key, value) in pairs {
            record.set(*key, *value);
        }
        record
    }
}

impl Serialize for FieldRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELD_COUNT))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key.as_str(), &value)?;
        }
        map.end()
    }
}

struct FieldRecordVisitor;

impl<'de> Visitor<'de> for FieldRecordVisitor {
    type Value = FieldRecord;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "an object with exactly {FIELD_COUNT} numeric applicant attributes")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut seen: [Option<f64>; FIELD_COUNT] = [None; FIELD_COUNT];

        while let Some(raw_key) = access.next_key::<String>()? {
            let key: FieldKey = raw_key.parse().map_err(de::Error::custom)?;
            let slot = &mut seen[key.index()];
            if slot.is_some() {
                return Err(de::Error::custom(format!("duplicate field `{key}`")));
            }
            *slot = Some(access.next_value()?);
        }

        let mut record = FieldRecord::default();
        for key in FieldKey::ALL {
            match seen[key.index()] {
                Some(value) => record.set(*key, value),
                None => return Err(de::Error::missing_field(key.as_str())),
            }
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for FieldRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FieldRecordVisitor)
    }
}
