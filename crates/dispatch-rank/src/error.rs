use thiserror::Error;

/// Terminal failures of one resolution request.
///
/// Gateway and partial-geocode failures are deliberately absent: those are
/// recovered inside the engine by falling back to the estimate path.
#[derive(Debug, Error)]
pub enum RankError {
    #[error("no valid postal code found in ticket input")]
    NoPostalFound,

    #[error("ticket postal code {postal} could not be resolved to a coordinate")]
    TicketUnresolved { postal: String },

    #[error("technician roster is empty")]
    EmptyRoster,

    #[error("no roster technician could be resolved to a coordinate")]
    NoCandidates,
}
