//----------------------------------------
// distribution errors
//----------------------------------------
use crate::error::CtsurvErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalDistErr {
    #[error("arguments to quantile function should be in (0, 1); got {0}")]
    QuantileOutOfBounds(f64),
}

impl From<NormalDistErr> for CtsurvErr {
    fn from(err: NormalDistErr) -> CtsurvErr {
        CtsurvErr::NormalDist(err)
    }
}
