pub mod adapters;
pub mod campaign;

pub use adapters::{CampaignSource, FileCampaignSource, StaticCampaignSource};
pub use campaign::{Campaign, CampaignCatalog};
