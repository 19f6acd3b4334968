mod local_stt_client;

pub use local_stt_client::{LocalSttClient, LocalSttHealth};
