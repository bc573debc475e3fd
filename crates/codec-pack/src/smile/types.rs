pub type SmileBytes = Vec<u8>;
