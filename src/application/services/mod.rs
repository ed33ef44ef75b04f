mod streaming_relay;

pub use streaming_relay::{
    InvalidRequest, RelayOutcome, RelayOutcomeHandle, RelayRequest, RelayState,
    RelayStream, StreamingRelay,
};
