use std::fmt;
use std::path::{Path, PathBuf};

/// Solar imaging filters offered by the image picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolarFilter {
    Eit171,
    Eit195,
    Eit284,
    Eit304,
    HmiContinuum,
    HmiMagnetogram,
    LascoC2,
    LascoC3,
}

impl SolarFilter {
    /// All filters, in dropdown order.
    pub const ALL: [SolarFilter; 8] = [
        SolarFilter::Eit171,
        SolarFilter::Eit195,
        SolarFilter::Eit284,
        SolarFilter::Eit304,
        SolarFilter::HmiContinuum,
        SolarFilter::HmiMagnetogram,
        SolarFilter::LascoC2,
        SolarFilter::LascoC3,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SolarFilter::Eit171 => "EIT 171",
            SolarFilter::Eit195 => "EIT 195",
            SolarFilter::Eit284 => "EIT 284",
            SolarFilter::Eit304 => "EIT 304",
            SolarFilter::HmiContinuum => "SDO/HMI Continuum",
            SolarFilter::HmiMagnetogram => "SDO/HMI Magnetogram",
            SolarFilter::LascoC2 => "LASCO C2",
            SolarFilter::LascoC3 => "LASCO C3",
        }
    }

    /// File name of the image inside the assets directory.
    pub fn asset_file(self) -> &'static str {
        match self {
            SolarFilter::Eit171 => "EIT 171.jpg",
            SolarFilter::Eit195 => "EIT 195.jpg",
            SolarFilter::Eit284 => "EIT 284.jpg",
            SolarFilter::Eit304 => "EIT 304.jpg",
            SolarFilter::HmiContinuum => "SDO.jpg",
            SolarFilter::HmiMagnetogram => "SDO2.jpg",
            SolarFilter::LascoC2 => "LASCO C2.jpg",
            SolarFilter::LascoC3 => "LASCO C3.jpg",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }
}

impl fmt::Display for SolarFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Image path for a dropdown label, or `None` if the label is unknown.
pub fn asset_path(assets_dir: &Path, label: &str) -> Option<PathBuf> {
    SolarFilter::from_label(label).map(|f| assets_dir.join(f.asset_file()))
}
