pub type UbjsonBytes = Vec<u8>;
