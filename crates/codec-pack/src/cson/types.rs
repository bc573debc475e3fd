pub type CsonText = String;
