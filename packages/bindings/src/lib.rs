use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_loan(input_json: String) -> NapiResult<String> {
    let input: loancalc_core::amortization::loan::LoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loancalc_core::amortization::loan::calculate_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: loancalc_core::amortization::loan::LoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loancalc_core::amortization::schedule::build_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Balloon
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_balloon_loan(input_json: String) -> NapiResult<String> {
    let input: loancalc_core::balloon::loan::BalloonLoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loancalc_core::balloon::loan::calculate_balloon_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
