pub type IonBytes = Vec<u8>;
