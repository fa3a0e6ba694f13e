use crate::errors::ReportError;
use chrono::{Datelike, Local, NaiveDate};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw values of the two date inputs, as submitted by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInputs {
    #[serde(default)]
    pub fecha_inicio: String,
    #[serde(default)]
    pub fecha_fin: String,
}

impl DateInputs {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            fecha_inicio: start.into(),
            fecha_fin: end.into(),
        }
    }

    /// First and last day of the month containing `today`.
    pub fn month_of(today: NaiveDate) -> Self {
        let first = today.with_day(1).unwrap_or(today);
        let next_month = if first.month() == 12 {
            NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
        };
        let last = next_month.and_then(|date| date.pred_opt()).unwrap_or(first);
        Self::new(
            first.format(DATE_FORMAT).to_string(),
            last.format(DATE_FORMAT).to_string(),
        )
    }

    pub fn validate(&self) -> Result<DateRange, ReportError> {
        let start = self.fecha_inicio.trim();
        let end = self.fecha_fin.trim();
        if start.is_empty() || end.is_empty() {
            return Err(ReportError::MissingDate);
        }

        let start = parse_date(start)?;
        let end = parse_date(end)?;
        if start > end {
            return Err(ReportError::StartAfterEnd);
        }

        Ok(DateRange { start, end })
    }
}

impl Default for DateInputs {
    fn default() -> Self {
        Self::month_of(Local::now().date_naive())
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ReportError::InvalidDate(value.to_string()))
}

/// Inclusive calendar range; only built through [`DateInputs::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn query(&self) -> [(&'static str, String); 2] {
        [
            ("fecha_inicio", self.start.format(DATE_FORMAT).to_string()),
            ("fecha_fin", self.end.format(DATE_FORMAT).to_string()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommissionEntry {
    pub name: String,
    pub total_sales: f64,
    pub commission: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct EntryTotals {
    total_ventas: f64,
    comision: f64,
}

/// Salesperson totals in the order the service listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommissionReport {
    entries: Vec<CommissionEntry>,
}

impl CommissionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, or overwrites the totals of an existing name in place.
    pub fn insert(&mut self, name: impl Into<String>, total_sales: f64, commission: f64) {
        let name = name.into();
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => {
                entry.total_sales = total_sales;
                entry.commission = commission;
            }
            None => self.entries.push(CommissionEntry {
                name,
                total_sales,
                commission,
            }),
        }
    }

    pub fn entries(&self) -> &[CommissionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for CommissionReport {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ReportVisitor;

        impl<'de> Visitor<'de> for ReportVisitor {
            type Value = CommissionReport;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping salesperson names to totals")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let capacity = map.size_hint().unwrap_or(0).min(1024);
                let mut entries: Vec<CommissionEntry> = Vec::with_capacity(capacity);
                let mut positions: HashMap<String, usize> = HashMap::with_capacity(capacity);
                while let Some((name, totals)) = map.next_entry::<String, EntryTotals>()? {
                    match positions.get(&name) {
                        Some(&index) => {
                            entries[index].total_sales = totals.total_ventas;
                            entries[index].commission = totals.comision;
                        }
                        None => {
                            positions.insert(name.clone(), entries.len());
                            entries.push(CommissionEntry {
                                name,
                                total_sales: totals.total_ventas,
                                commission: totals.comision,
                            });
                        }
                    }
                }
                Ok(CommissionReport { entries })
            }
        }

        deserializer.deserialize_map(ReportVisitor)
    }
}

impl Serialize for CommissionReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(
                &entry.name,
                &EntryTotals {
                    total_ventas: entry.total_sales,
                    comision: entry.commission,
                },
            )?;
        }
        map.end()
    }
}

#[derive(Debug, Deserialize)]
pub struct ServiceErrorBody {
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Error { message: String },
    Loaded { report: CommissionReport },
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub inputs: DateInputs,
    pub state: RequestState,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub state: RequestState,
    pub results_html: String,
    pub button_label: String,
}
