use std::fmt::{self, Display};

use crate::error::EncodingErr;

/// The cities the form offers, in display order.
///
/// Names are kept exactly as they appear in the training data, lowercase ones
/// included, since they end up in one-hot column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    JakartaSelatan,
    JakartaTimur,
    JakartaBarat,
    JakartaPusat,
    JakartaUtara,
    Bogor,
    Depok,
    Tangerang,
    TangerangSelatan,
    Bekasi,
    Surabaya,
    Malang,
    Sidoarjo,
    Makassar,
    Gowa,
    Maros,
    Parepare,
    Palopo,
    Bulukumba,
    Takalar,
}

impl City {
    pub const ALL: [City; 20] = [
        City::JakartaSelatan,
        City::JakartaTimur,
        City::JakartaBarat,
        City::JakartaPusat,
        City::JakartaUtara,
        City::Bogor,
        City::Depok,
        City::Tangerang,
        City::TangerangSelatan,
        City::Bekasi,
        City::Surabaya,
        City::Malang,
        City::Sidoarjo,
        City::Makassar,
        City::Gowa,
        City::Maros,
        City::Parepare,
        City::Palopo,
        City::Bulukumba,
        City::Takalar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            City::JakartaSelatan => "Jakarta Selatan",
            City::JakartaTimur => "Jakarta Timur",
            City::JakartaBarat => "Jakarta Barat",
            City::JakartaPusat => "Jakarta Pusat",
            City::JakartaUtara => "Jakarta Utara",
            City::Bogor => "Bogor",
            City::Depok => "Depok",
            City::Tangerang => "Tangerang",
            City::TangerangSelatan => "Tangerang Selatan",
            City::Bekasi => "Bekasi",
            City::Surabaya => "surabaya",
            City::Malang => "malang",
            City::Sidoarjo => "sidoarjo",
            City::Makassar => "makassar",
            City::Gowa => "gowa",
            City::Maros => "maros",
            City::Parepare => "parepare",
            City::Palopo => "palopo",
            City::Bulukumba => "bulukumba",
            City::Takalar => "takalar",
        }
    }

    /// Looks a city up by its exact training-data name.
    pub fn from_name(name: &str) -> Option<City> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One submitted row of house attributes.
///
/// Numeric bounds are the form's business; the encoder takes these values as
/// they come. `city` is free text so that names outside [`City::ALL`] can still
/// reach the encoder, which zero-fills them.
#[derive(Debug, Clone, PartialEq)]
pub struct RawInput {
    pub area: f64,
    pub building_area: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub garage: u32,
    pub city: String,
}

/// The six form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Area,
    BuildingArea,
    Bedrooms,
    Bathrooms,
    Garage,
    City,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Real,
    Integer,
}

/// Bounds, default and step of a numeric form field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberSpec {
    pub kind: NumberKind,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl NumberSpec {
    /// Moves `value` by `steps` increments, clamped to the bounds.
    pub fn step_by(&self, value: f64, steps: i32) -> f64 {
        (value + self.step * f64::from(steps)).clamp(self.min, self.max)
    }

    /// Renders a value the way the form displays it.
    pub fn format(&self, value: f64) -> String {
        match self.kind {
            NumberKind::Real => format!("{value:.1}"),
            NumberKind::Integer => format!("{value:.0}"),
        }
    }
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Area,
        Field::BuildingArea,
        Field::Bedrooms,
        Field::Bathrooms,
        Field::Garage,
        Field::City,
    ];

    pub const DEFAULT_CITY: City = City::JakartaSelatan;

    /// Machine name, as used in error messages.
    pub fn key(self) -> &'static str {
        match self {
            Field::Area => "area",
            Field::BuildingArea => "building_area",
            Field::Bedrooms => "bedrooms",
            Field::Bathrooms => "bathrooms",
            Field::Garage => "garage",
            Field::City => "city",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Area => "Luas Tanah (m2)",
            Field::BuildingArea => "Luas Bangunan (m2)",
            Field::Bedrooms => "Jumlah Kamar Tidur",
            Field::Bathrooms => "Jumlah Kamar Mandi",
            Field::Garage => "Luas Garasi (mobil)",
            Field::City => "Kota",
        }
    }

    /// Numeric constraints, `None` for the city selector.
    pub fn number_spec(self) -> Option<NumberSpec> {
        use NumberKind::*;

        let spec = |kind, min, max, default, step| NumberSpec {
            kind,
            min,
            max,
            default,
            step,
        };

        match self {
            Field::Area => Some(spec(Real, 30.0, 1000.0, 120.0, 10.0)),
            Field::BuildingArea => Some(spec(Real, 20.0, 800.0, 90.0, 10.0)),
            Field::Bedrooms => Some(spec(Integer, 1.0, 10.0, 3.0, 1.0)),
            Field::Bathrooms => Some(spec(Integer, 1.0, 8.0, 1.0, 1.0)),
            Field::Garage => Some(spec(Integer, 0.0, 5.0, 1.0, 1.0)),
            Field::City => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// The textual state of the form before it is submitted.
///
/// Every field may be empty; conversion into a [`RawInput`] is where missing
/// and malformed values are caught.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputDraft {
    values: [Option<String>; 6],
}

impl InputDraft {
    /// A draft pre-filled with the form's default values.
    pub fn with_defaults() -> Self {
        let mut draft = Self::default();
        for field in Field::ALL {
            let value = match field.number_spec() {
                Some(spec) => spec.format(spec.default),
                None => Field::DEFAULT_CITY.name().to_string(),
            };
            draft.set(field, Some(value));
        }
        draft
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values[field.index()].as_deref()
    }

    pub fn set(&mut self, field: Field, value: Option<String>) {
        self.values[field.index()] = value;
    }

    pub fn get_mut(&mut self, field: Field) -> &mut Option<String> {
        &mut self.values[field.index()]
    }

    fn text(&self, field: Field) -> Result<&str, EncodingErr> {
        self.get(field)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(EncodingErr::MissingField(field.key()))
    }

    fn number(&self, field: Field) -> Result<f64, EncodingErr> {
        let text = self.text(field)?;
        let Some(spec) = field.number_spec() else {
            return Err(EncodingErr::InvalidNumber {
                field: field.key(),
                value: text.to_string(),
            });
        };

        let invalid = || EncodingErr::InvalidNumber {
            field: field.key(),
            value: text.to_string(),
        };

        let value = match spec.kind {
            NumberKind::Real => text.parse::<f64>().map_err(|_| invalid())?,
            NumberKind::Integer => f64::from(text.parse::<u32>().map_err(|_| invalid())?),
        };

        if !value.is_finite() {
            return Err(invalid());
        }

        if value < spec.min || value > spec.max {
            return Err(EncodingErr::OutOfRange {
                field: field.key(),
                value,
                min: spec.min,
                max: spec.max,
            });
        }

        Ok(value)
    }
}

impl TryFrom<&InputDraft> for RawInput {
    type Error = EncodingErr;

    fn try_from(draft: &InputDraft) -> Result<Self, Self::Error> {
        // Integer fields were parsed as u32 and bounds-checked, so the casts are exact.
        Ok(RawInput {
            area: draft.number(Field::Area)?,
            building_area: draft.number(Field::BuildingArea)?,
            bedrooms: draft.number(Field::Bedrooms)? as u32,
            bathrooms: draft.number(Field::Bathrooms)? as u32,
            garage: draft.number(Field::Garage)? as u32,
            city: draft.text(Field::City)?.to_string(),
        })
    }
}
