//! Trip models: recurring trip templates, daily occurrences and their
//! loosely-typed wire encodings (time of day, weekday lists).

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::enums::TripState,
};

// ---------------------------------------------------------------------------
// WireTime
// ---------------------------------------------------------------------------

/// Time of day as it arrives from the remote service.
///
/// Depending on the endpoint the same `LocalTime` is serialized as a string
/// (`"14:05:00"`), a tuple (`[14, 5, 0]`) or an object
/// (`{"hour": 14, "minute": 5, ...}`). Anything else lands in `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireTime {
    Text(String),
    Parts(Vec<i64>),
    Fields {
        hour: i64,
        minute: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        second: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        nano: Option<i64>,
    },
    Other(serde_json::Value),
}

impl Default for WireTime {
    fn default() -> Self {
        WireTime::Other(serde_json::Value::Null)
    }
}

impl From<NaiveTime> for WireTime {
    fn from(t: NaiveTime) -> Self {
        WireTime::Text(t.format("%H:%M:%S").to_string())
    }
}

impl WireTime {
    /// Decode into a time of day (seconds and below are dropped)
    pub fn to_time(&self) -> AppResult<NaiveTime> {
        let (hour, minute) = match self {
            WireTime::Text(text) => parse_clock_text(text)?,
            WireTime::Parts(parts) if parts.len() >= 2 => (parts[0], parts[1]),
            WireTime::Parts(parts) => {
                return Err(AppError::Decode(format!(
                    "time tuple needs hour and minute, got {} element(s)",
                    parts.len()
                )))
            }
            WireTime::Fields { hour, minute, .. } => (*hour, *minute),
            WireTime::Other(value) => {
                return Err(AppError::Decode(format!("unrecognized time encoding: {}", value)))
            }
        };

        u32::try_from(hour)
            .ok()
            .zip(u32::try_from(minute).ok())
            .and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0))
            .ok_or_else(|| AppError::Decode(format!("time out of range: {}:{}", hour, minute)))
    }

    /// Canonical zero-padded `HH:MM` form
    pub fn canonical(&self) -> AppResult<String> {
        Ok(format_clock(&self.to_time()?))
    }

    /// Display key that never fails: the canonical form, else the raw text
    /// truncated to five characters, else `fallback`
    pub fn lenient_key(&self, fallback: &str) -> String {
        if let Ok(canonical) = self.canonical() {
            return canonical;
        }
        match self {
            WireTime::Text(text) if !text.trim().is_empty() => text.trim().chars().take(5).collect(),
            _ => fallback.to_string(),
        }
    }
}

/// `HH:MM` for a time of day
pub fn format_clock(time: &NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Parse `H:M`, `H:M:S` or `H:M:S.fraction`
fn parse_clock_text(text: &str) -> AppResult<(i64, i64)> {
    let invalid = || AppError::Decode(format!("invalid time string: {:?}", text));

    let mut parts = text.trim().split(':');
    let hour = parts.next().and_then(|h| h.trim().parse::<i64>().ok()).ok_or_else(invalid)?;
    let minute = parts.next().and_then(|m| m.trim().parse::<i64>().ok()).ok_or_else(invalid)?;
    if let Some(second) = parts.next() {
        let (whole, fraction) = match second.trim().split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (second.trim(), None),
        };
        let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !digits(whole) || whole.parse::<u32>().map_or(true, |s| s > 59) {
            return Err(invalid());
        }
        if fraction.is_some_and(|f| !digits(f)) {
            return Err(invalid());
        }
    }
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok((hour, minute))
}

// ---------------------------------------------------------------------------
// Weekdays
// ---------------------------------------------------------------------------

/// Set of ISO weekday numbers (1 = Monday ... 7 = Sunday).
/// Travels as a comma-joined string such as `"1,3,5"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub fn new() -> Self {
        Self(0)
    }

    /// Add a weekday; returns false when `day` is outside 1..=7
    pub fn insert(&mut self, day: u8) -> bool {
        if (1..=7).contains(&day) {
            self.0 |= 1 << (day - 1);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, day: u8) -> bool {
        (1..=7).contains(&day) && self.0 & (1 << (day - 1)) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Weekdays in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=7u8).filter(move |d| self.contains(*d))
    }
}

impl FromIterator<u8> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = WeekdaySet::new();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl std::fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let days: Vec<String> = self.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", days.join(","))
    }
}

/// Strict parse: every token must be a weekday and the set must not be empty
impl std::str::FromStr for WeekdaySet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decoded = parse_weekdays(s);
        if let Some(token) = decoded.rejected.first() {
            return Err(format!("invalid weekday {:?} in {:?}", token, s));
        }
        if decoded.days.is_empty() {
            return Err(format!("no weekdays in {:?}", s));
        }
        Ok(decoded.days)
    }
}

/// Result of a permissive weekday decode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekdayDecode {
    pub days: WeekdaySet,
    /// Non-empty tokens that were not an integer in 1..=7
    pub rejected: Vec<String>,
}

/// Split on commas, trim, and keep every token that is a weekday number.
/// Blank tokens are skipped; anything else unusable is reported in `rejected`.
pub fn parse_weekdays(raw: &str) -> WeekdayDecode {
    let mut decoded = WeekdayDecode::default();
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let accepted = token
            .parse::<u8>()
            .map(|day| decoded.days.insert(day))
            .unwrap_or(false);
        if !accepted {
            decoded.rejected.push(token.to_string());
        }
    }
    decoded
}

// ---------------------------------------------------------------------------
// RecurringTrip
// ---------------------------------------------------------------------------

/// A transport order template recurring on given weekdays at a fixed time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringTrip {
    pub id: i32,
    #[serde(rename = "idAgenda", default)]
    pub schedule_id: Option<i32>,
    #[serde(rename = "idPaciente")]
    pub patient_id: i32,
    #[serde(rename = "idChofer", default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<i32>,
    #[serde(rename = "direccionOrigen", default)]
    pub origin_address: String,
    #[serde(rename = "direccionDestino", default)]
    pub destination_address: String,
    #[serde(rename = "horaProgramada", default)]
    pub scheduled_time: WireTime,
    /// Raw comma-joined weekday list, decoded on use
    #[serde(rename = "diasSemana", default)]
    pub weekdays: String,
    #[serde(rename = "fechaInicio", default)]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "fechaFin", default)]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "activo", default)]
    pub active: bool,
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,
    #[serde(rename = "estadoActual", default, skip_serializing_if = "Option::is_none")]
    pub current_state: Option<TripState>,
    #[serde(rename = "nombreCompletoPaciente", default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(rename = "nombreCompletoChofer", default, skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
    #[serde(rename = "telefonoPaciente", default, skip_serializing_if = "Option::is_none")]
    pub patient_phone: Option<String>,
    #[serde(rename = "telefonoChofer", default, skip_serializing_if = "Option::is_none")]
    pub driver_phone: Option<String>,
    #[serde(rename = "sillaRueda", default, skip_serializing_if = "Option::is_none")]
    pub wheelchair: Option<bool>,
}

impl RecurringTrip {
    /// Permissive decode of the weekday list
    pub fn weekday_decode(&self) -> WeekdayDecode {
        parse_weekdays(&self.weekdays)
    }
}

/// Create recurring trip request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateRecurringTrip {
    #[serde(rename = "idAgenda")]
    pub schedule_id: i32,
    #[serde(rename = "idPaciente")]
    pub patient_id: i32,
    #[serde(rename = "direccionOrigen")]
    #[validate(length(min = 1, message = "origin address is required"))]
    pub origin_address: String,
    #[serde(rename = "direccionDestino")]
    #[validate(length(min = 1, message = "destination address is required"))]
    pub destination_address: String,
    #[serde(rename = "horaProgramada")]
    pub scheduled_time: NaiveTime,
    #[serde(rename = "diasSemana")]
    #[validate(custom(function = "validate_weekdays"))]
    pub weekdays: WeekdaySet,
    #[serde(rename = "fechaInicio")]
    pub start_date: NaiveDate,
    #[serde(rename = "fechaFin", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "observaciones", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Update recurring trip request (only present fields are changed)
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateRecurringTrip {
    #[serde(rename = "idAgenda", skip_serializing_if = "Option::is_none")]
    pub schedule_id: Option<i32>,
    #[serde(rename = "idPaciente", skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<i32>,
    #[serde(rename = "direccionOrigen", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "origin address is required"))]
    pub origin_address: Option<String>,
    #[serde(rename = "direccionDestino", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "destination address is required"))]
    pub destination_address: Option<String>,
    #[serde(rename = "horaProgramada", skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<NaiveTime>,
    #[serde(rename = "diasSemana", skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_weekdays"))]
    pub weekdays: Option<WeekdaySet>,
    #[serde(rename = "fechaInicio", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "fechaFin", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "observaciones", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "activo", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

fn validate_weekdays(days: &WeekdaySet) -> Result<(), validator::ValidationError> {
    if days.is_empty() {
        let mut err = validator::ValidationError::new("weekdays");
        err.message = Some("select at least one weekday".into());
        return Err(err);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// TripOccurrence
// ---------------------------------------------------------------------------

/// One calendar-day instance of a recurring trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripOccurrence {
    #[serde(rename = "idTraslado")]
    pub trip_id: i32,
    #[serde(rename = "idPaciente")]
    pub patient_id: i32,
    #[serde(rename = "idChofer", default)]
    pub driver_id: Option<i32>,
    #[serde(rename = "nombreCompletoPaciente", default)]
    pub patient_name: String,
    #[serde(rename = "nombreCompletoChofer", default)]
    pub driver_name: Option<String>,
    #[serde(rename = "direccionOrigen", default)]
    pub origin_address: String,
    #[serde(rename = "direccionDestino", default)]
    pub destination_address: String,
    #[serde(rename = "horaProgramada", default)]
    pub scheduled_time: WireTime,
    #[serde(rename = "estadoActual")]
    pub current_state: TripState,
    #[serde(rename = "sillaRueda", default)]
    pub wheelchair: bool,
    #[serde(rename = "telefonoPaciente", default)]
    pub patient_phone: Option<String>,
    #[serde(rename = "telefonoChofer", default)]
    pub driver_phone: Option<String>,
    /// Supplied by the server; the console never computes transition legality
    #[serde(rename = "puedeIniciar", default)]
    pub can_start: bool,
    #[serde(rename = "puedeFinalizar", default)]
    pub can_finish: bool,
    #[serde(rename = "fechaProgramada", default)]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,
}

/// Response of the weekly agenda endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyAgenda {
    #[serde(rename = "inicioSemana")]
    pub week_start: NaiveDate,
    #[serde(rename = "finSemana")]
    pub week_end: NaiveDate,
    #[serde(rename = "traslados", default)]
    pub trips: Vec<RecurringTrip>,
}

/// Body of the start / finish / cancel calls
#[derive(Debug, Clone, Serialize)]
pub struct TransitionRequest {
    #[serde(rename = "usuarioId")]
    pub user_id: i32,
    #[serde(rename = "motivo", skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Acknowledgement returned by a state transition
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionAck {
    #[serde(default)]
    pub message: Option<String>,
}

/// Live travel estimate between a trip's origin and destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelEstimate {
    #[serde(default)]
    pub success: bool,
    #[serde(rename = "duracion", default)]
    pub duration: Option<String>,
    #[serde(rename = "duracionTexto", default)]
    pub duration_text: Option<String>,
    #[serde(rename = "distancia", default)]
    pub distance: Option<String>,
    #[serde(rename = "distanciaTexto", default)]
    pub distance_text: Option<String>,
    #[serde(rename = "trafico", default)]
    pub traffic: Option<String>,
    #[serde(rename = "ultimaActualizacion", default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(value: serde_json::Value) -> WireTime {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_wire_time_shapes_are_equivalent() {
        assert_eq!(wire(json!("14:05:00")).canonical().unwrap(), "14:05");
        assert_eq!(wire(json!([14, 5])).canonical().unwrap(), "14:05");
        assert_eq!(wire(json!([14, 5, 0])).canonical().unwrap(), "14:05");
        assert_eq!(
            wire(json!({"hour": 14, "minute": 5, "second": 0, "nano": 0})).canonical().unwrap(),
            "14:05"
        );
        assert_eq!(wire(json!({"hour": 14, "minute": 5})).canonical().unwrap(), "14:05");
    }

    #[test]
    fn test_wire_time_variants() {
        assert!(matches!(wire(json!("09:00")), WireTime::Text(_)));
        assert!(matches!(wire(json!([9, 0])), WireTime::Parts(_)));
        assert!(matches!(wire(json!({"hour": 9, "minute": 0})), WireTime::Fields { .. }));
        assert!(matches!(wire(json!(930)), WireTime::Other(_)));
        assert!(matches!(wire(json!({"h": 9})), WireTime::Other(_)));
        assert!(matches!(wire(json!(null)), WireTime::Other(_)));
    }

    #[test]
    fn test_canonical_is_idempotent() {
        for text in ["00:00", "07:30", "14:05", "23:59"] {
            let once = WireTime::Text(text.to_string()).canonical().unwrap();
            assert_eq!(once, text);
            let twice = WireTime::Text(once).canonical().unwrap();
            assert_eq!(twice, text);
        }
    }

    #[test]
    fn test_canonical_pads_components() {
        assert_eq!(WireTime::Text("9:5".into()).canonical().unwrap(), "09:05");
        assert_eq!(WireTime::Parts(vec![7, 0, 0]).canonical().unwrap(), "07:00");
        assert_eq!(WireTime::Text("08:15:30.250".into()).canonical().unwrap(), "08:15");
    }

    #[test]
    fn test_undecodable_times() {
        assert!(WireTime::Text("noon".into()).canonical().is_err());
        assert!(WireTime::Text("25:00".into()).canonical().is_err());
        assert!(WireTime::Text("10:00:00:00".into()).canonical().is_err());
        assert!(WireTime::Parts(vec![9]).canonical().is_err());
        assert!(WireTime::Parts(vec![-1, 0]).canonical().is_err());
        assert!(WireTime::default().canonical().is_err());
    }

    #[test]
    fn test_seconds_must_be_numeric() {
        assert!(WireTime::Text("10:00:NaN".into()).canonical().is_err());
        assert!(WireTime::Text("10:00:inf".into()).canonical().is_err());
        assert!(WireTime::Text("10:00:-1".into()).canonical().is_err());
        assert!(WireTime::Text("10:00:61".into()).canonical().is_err());
        assert!(WireTime::Text("10:00:5.".into()).canonical().is_err());
        assert!(WireTime::Text("10:00:1e1".into()).canonical().is_err());
        assert_eq!(WireTime::Text("10:00:59.999".into()).canonical().unwrap(), "10:00");
    }

    #[test]
    fn test_lenient_key() {
        assert_eq!(WireTime::Parts(vec![7, 5]).lenient_key("00:00"), "07:05");
        assert_eq!(WireTime::Text(" tarde del día ".into()).lenient_key("00:00"), "tarde");
        assert_eq!(WireTime::Text("   ".into()).lenient_key("00:00"), "00:00");
        assert_eq!(WireTime::Other(serde_json::json!(930)).lenient_key("00:00"), "00:00");
    }

    #[test]
    fn test_parse_weekdays_drops_bad_tokens() {
        let decoded = parse_weekdays("1,x,5");
        assert_eq!(decoded.days.iter().collect::<Vec<_>>(), vec![1, 5]);
        assert_eq!(decoded.rejected, vec!["x".to_string()]);

        let decoded = parse_weekdays(" 2 , 9, 0,7 ,,");
        assert_eq!(decoded.days.iter().collect::<Vec<_>>(), vec![2, 7]);
        assert_eq!(decoded.rejected, vec!["9".to_string(), "0".to_string()]);

        assert!(parse_weekdays("").days.is_empty());
    }

    #[test]
    fn test_weekday_set_strict_parse_and_display() {
        let days: WeekdaySet = "5,1,3,3".parse().unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(days.to_string(), "1,3,5");
        assert!("1,x".parse::<WeekdaySet>().is_err());
        assert!("".parse::<WeekdaySet>().is_err());
        assert_eq!(serde_json::to_string(&days).unwrap(), "\"1,3,5\"");
    }

    #[test]
    fn test_recurring_trip_deserialize() {
        let trip: RecurringTrip = serde_json::from_value(json!({
            "id": 12,
            "idAgenda": 3,
            "idPaciente": 40,
            "direccionOrigen": "Av. Colón 1200",
            "direccionDestino": "Hospital Privado",
            "horaProgramada": "08:30:00",
            "diasSemana": "1,3,5",
            "fechaInicio": "2025-05-26",
            "activo": true
        }))
        .unwrap();

        assert_eq!(trip.schedule_id, Some(3));
        assert_eq!(trip.scheduled_time.canonical().unwrap(), "08:30");
        assert_eq!(trip.weekday_decode().days.len(), 3);
        assert_eq!(trip.end_date, None);
    }

    #[test]
    fn test_create_trip_serializes_wire_format() {
        let request = CreateRecurringTrip {
            schedule_id: 3,
            patient_id: 40,
            origin_address: "Av. Colón 1200".into(),
            destination_address: "Hospital Privado".into(),
            scheduled_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            weekdays: [1, 3, 5].into_iter().collect(),
            start_date: NaiveDate::from_ymd_opt(2025, 5, 26).unwrap(),
            end_date: None,
            notes: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["horaProgramada"], "08:30:00");
        assert_eq!(value["diasSemana"], "1,3,5");
        assert_eq!(value["fechaInicio"], "2025-05-26");
        assert!(value.get("fechaFin").is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_trip_requires_weekdays() {
        let request = CreateRecurringTrip {
            schedule_id: 3,
            patient_id: 40,
            origin_address: "A".into(),
            destination_address: "B".into(),
            scheduled_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            weekdays: WeekdaySet::new(),
            start_date: NaiveDate::from_ymd_opt(2025, 5, 26).unwrap(),
            end_date: None,
            notes: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_occurrence_deserialize_object_time() {
        let occurrence: TripOccurrence = serde_json::from_value(json!({
            "idTraslado": 7,
            "idPaciente": 40,
            "nombreCompletoPaciente": "Ana Pérez",
            "direccionOrigen": "A",
            "direccionDestino": "B",
            "horaProgramada": {"hour": 7, "minute": 45, "second": 0, "nano": 0},
            "estadoActual": "PENDIENTE",
            "sillaRueda": true,
            "telefonoPaciente": "351000000",
            "puedeIniciar": true,
            "puedeFinalizar": false
        }))
        .unwrap();

        assert_eq!(occurrence.scheduled_time.canonical().unwrap(), "07:45");
        assert_eq!(occurrence.current_state, TripState::Scheduled);
        assert!(occurrence.can_start);
        assert!(!occurrence.can_finish);
    }
}
