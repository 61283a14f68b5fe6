//! The entry form: the fields shared by the create and edit pages, and the
//! parsing that turns submitted form data into a validated draft.

use maud::{Markup, html};
use serde::Deserialize;
use time::{
    OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::{
    Error,
    entry::core::EntryDraft,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The format used by `datetime-local` inputs: minute precision, no offset.
pub const FORM_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");

/// The form data submitted when creating or editing an entry.
///
/// The amount and date arrive as raw strings so that parse failures can be
/// reported as validation errors instead of an opaque rejection.
#[derive(Debug, Deserialize)]
pub struct EntryForm {
    /// The value of the `datetime-local` date input.
    pub date: String,
    /// The amount in yen. Positive for income, negative for spending.
    pub amount: String,
    /// A free-text note about the entry.
    #[serde(default)]
    pub memo: String,
}

impl EntryForm {
    /// Parse and validate the submitted fields into a draft entry.
    ///
    /// The date is interpreted as wall-clock time in the timezone given by
    /// `local_offset` and normalized to UTC. The memo is trimmed.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidDate] if the date is not a valid `datetime-local` value,
    /// - [Error::InvalidAmount] if the amount does not parse as a number,
    /// - or [Error::NonFiniteAmount] if the amount parses to NaN or an infinity.
    pub fn into_draft(self, local_offset: UtcOffset) -> Result<EntryDraft, Error> {
        let date = PrimitiveDateTime::parse(&self.date, FORM_DATE_FORMAT)
            .map_err(|error| Error::InvalidDate(self.date.clone(), error.to_string()))?
            .assume_offset(local_offset)
            .to_offset(UtcOffset::UTC);

        let amount: f64 = self
            .amount
            .trim()
            .parse()
            .map_err(|_| Error::InvalidAmount(self.amount.clone()))?;

        EntryDraft::new(date, amount, self.memo.trim().to_owned())
    }
}

/// Format `date` the way the form's `datetime-local` input expects,
/// truncating to minute precision in the local timezone.
pub fn form_date_value(date: OffsetDateTime, local_offset: UtcOffset) -> String {
    date.to_offset(local_offset)
        .format(FORM_DATE_FORMAT)
        // The format only reads fields every date-time has.
        .expect("formatting a date-time with the form date format cannot fail")
}

/// The prefilled values for the entry form fields.
pub struct EntryFormDefaults<'a> {
    /// The `datetime-local` value for the date input.
    pub date_value: String,
    /// The prefilled amount, if editing an existing entry.
    pub amount: Option<f64>,
    /// The prefilled memo, if editing an existing entry.
    pub memo: Option<&'a str>,
}

/// The form fields shared by the create and edit entry pages.
pub fn entry_form_fields(defaults: &EntryFormDefaults<'_>) -> Markup {
    let amount_str = defaults.amount.map(|amount| format!("{amount}"));

    html! {
        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date and time"
            }

            input
                name="date"
                id="date"
                type="datetime-local"
                value=(defaults.date_value)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            // w-full needed to ensure input takes the full width when prefilled with a value
            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="1"
                    placeholder="1000"
                    required
                    value=[amount_str.as_deref()]
                    autofocus[defaults.amount.is_none()]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            p class="mt-1 text-xs text-gray-500 dark:text-gray-400"
            {
                "Enter income as a positive number and spending as a negative number."
            }
        }

        div
        {
            label
                for="memo"
                class=(FORM_LABEL_STYLE)
            {
                "Memo (optional)"
            }

            textarea
                name="memo"
                id="memo"
                rows="3"
                placeholder="What was it for?"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @if let Some(memo) = defaults.memo {
                    (memo)
                }
            }
        }
    }
}
