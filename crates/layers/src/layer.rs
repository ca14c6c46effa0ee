use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub u64);

pub trait Layer {
    fn id(&self) -> LayerId;
}
