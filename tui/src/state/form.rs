use estimator::{
    ArtifactBundle, City, Estimate, EstimateErr, Field, InputDraft, NumberKind, RawInput,
};
use log::{info, warn};

/// What can hold the keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(Field),
    Submit,
}

/// Tab order: left column, right column, then the button.
pub const FOCUS_ORDER: [Focus; 7] = [
    Focus::Field(Field::Area),
    Focus::Field(Field::Bedrooms),
    Focus::Field(Field::Garage),
    Focus::Field(Field::BuildingArea),
    Focus::Field(Field::Bathrooms),
    Focus::Field(Field::City),
    Focus::Submit,
];

/// Result of the last submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Estimate),
    Failure(String),
}

/// The prediction form: its draft values, focus and last outcome.
pub struct FormState<'a> {
    bundle: &'a ArtifactBundle,
    draft: InputDraft,
    focus: usize,
    outcome: Option<Outcome>,
}

impl<'a> FormState<'a> {
    /// Creates a new `FormState` pre-filled with the default house.
    ///
    /// # Args
    /// * `bundle` - The loaded artifacts every submission is priced with.
    pub fn new(bundle: &'a ArtifactBundle) -> Self {
        Self {
            bundle,
            draft: InputDraft::with_defaults(),
            focus: 0,
            outcome: None,
        }
    }

    pub fn draft(&self) -> &InputDraft {
        &self.draft
    }

    pub fn focus(&self) -> Focus {
        FOCUS_ORDER[self.focus]
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FOCUS_ORDER.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + FOCUS_ORDER.len() - 1) % FOCUS_ORDER.len();
    }

    /// Types a character into the focused numeric field.
    ///
    /// Only digits are accepted, plus a single `.` in real-valued fields.
    pub fn type_char(&mut self, c: char) {
        let Focus::Field(field) = self.focus() else {
            return;
        };
        let Some(spec) = field.number_spec() else {
            return;
        };

        let text = self.draft.get_mut(field).get_or_insert_with(String::new);
        let accepted = c.is_ascii_digit()
            || (c == '.' && spec.kind == NumberKind::Real && !text.contains('.'));

        if accepted {
            text.push(c);
        }
    }

    /// Deletes the last character of the focused numeric field.
    ///
    /// Deleting the last character leaves the field empty.
    pub fn backspace(&mut self) {
        let Focus::Field(field) = self.focus() else {
            return;
        };
        if field.number_spec().is_none() {
            return;
        }

        let slot = self.draft.get_mut(field);
        if let Some(text) = slot.as_mut() {
            text.pop();
        }
        if slot.as_deref() == Some("") {
            *slot = None;
        }
    }

    /// Moves the focused field by `steps`: numbers by their step within bounds,
    /// the city through the list, wrapping around.
    pub fn step(&mut self, steps: i32) {
        let Focus::Field(field) = self.focus() else {
            return;
        };

        let Some(spec) = field.number_spec() else {
            let n = City::ALL.len() as i32;
            let next = (self.city_index() as i32 + steps).rem_euclid(n) as usize;
            self.draft
                .set(Field::City, Some(City::ALL[next].name().to_string()));
            return;
        };

        let current = self
            .draft
            .get(field)
            .and_then(|text| text.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(spec.default);

        self.draft
            .set(field, Some(spec.format(spec.step_by(current, steps))));
    }

    /// Position of the selected city in [`City::ALL`], the first one if unset.
    pub fn city_index(&self) -> usize {
        self.draft
            .get(Field::City)
            .and_then(City::from_name)
            .and_then(|city| City::ALL.iter().position(|&c| c == city))
            .unwrap_or(0)
    }

    /// Prices the current draft and records the outcome.
    pub fn submit(&mut self) -> &Outcome {
        let result = RawInput::try_from(&self.draft)
            .map_err(EstimateErr::from)
            .and_then(|input| self.bundle.estimate(&input));

        let outcome = match result {
            Ok(estimate) => {
                info!(price = estimate.price.rupiah(); "prediction succeeded");
                Outcome::Success(estimate)
            }
            Err(e) => {
                warn!("prediction failed: {e}");
                Outcome::Failure(format!("Error during prediction: {e}"))
            }
        };

        self.outcome.insert(outcome)
    }
}
