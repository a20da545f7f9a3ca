/// The fixed set of facility categories the map knows about.
///
/// `ALL` is the authoritative ordering: datasets load, results render and
/// summaries enumerate in exactly this order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FacilityCategory {
    GpSurgery,
    Hospital,
    Pharmacy,
    Library,
    School,
}

impl FacilityCategory {
    pub const ALL: [FacilityCategory; 5] = [
        FacilityCategory::GpSurgery,
        FacilityCategory::Hospital,
        FacilityCategory::Pharmacy,
        FacilityCategory::Library,
        FacilityCategory::School,
    ];

    /// File name of the static GeoJSON dataset for this category.
    pub fn dataset_file(self) -> &'static str {
        match self {
            FacilityCategory::GpSurgery => "GP_Surgeries.geojson",
            FacilityCategory::Hospital => "hospital.geojson",
            FacilityCategory::Pharmacy => "Pharmacies.geojson",
            FacilityCategory::Library => "Libraries.geojson",
            FacilityCategory::School => "Primary_Schools.geojson",
        }
    }

    /// Key under which the analysis backend reports this category.
    pub fn response_key(self) -> &'static str {
        match self {
            FacilityCategory::GpSurgery => "nearest_gp_surgery",
            FacilityCategory::Hospital => "nearest_hospital",
            FacilityCategory::Pharmacy => "nearest_pharmacy",
            FacilityCategory::Library => "nearest_library",
            FacilityCategory::School => "nearest_school",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FacilityCategory::GpSurgery => "GP surgery",
            FacilityCategory::Hospital => "Hospital",
            FacilityCategory::Pharmacy => "Pharmacy",
            FacilityCategory::Library => "Library",
            FacilityCategory::School => "School",
        }
    }

    pub fn from_response_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.response_key() == key)
    }
}

impl std::fmt::Display for FacilityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::FacilityCategory;

    #[test]
    fn response_keys_round_trip() {
        for cat in FacilityCategory::ALL {
            assert_eq!(FacilityCategory::from_response_key(cat.response_key()), Some(cat));
        }
        assert_eq!(FacilityCategory::from_response_key("nearest_helipad"), None);
    }

    #[test]
    fn render_order_starts_with_medical_categories() {
        assert_eq!(
            &FacilityCategory::ALL[..3],
            &[
                FacilityCategory::GpSurgery,
                FacilityCategory::Hospital,
                FacilityCategory::Pharmacy,
            ]
        );
    }
}
