/// One row of an OpenML style split file
#[derive(Debug, Deserialize)]
pub struct SplitItem {
    #[serde(rename = "type")]
    pub purpose: TrainTest,

    pub rowid: usize,

    pub repeat: usize,

    pub fold: usize,
}

#[derive(Debug, Deserialize)]
pub enum TrainTest {
    #[serde(rename = "TRAIN")]
    Train,

    #[serde(rename = "TEST")]
    Test,
}
