pub type BencodeBytes = Vec<u8>;
