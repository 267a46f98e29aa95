use std::collections::BTreeMap;

use texprobe_formats::FormatDescriptor;

/// What a registered test does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestCase {
    /// Four gradient layers uploaded as a volume in the given encoding.
    DirectVolume(&'static FormatDescriptor),
    /// An index volume plus palette in the `SZ_I8_A8R8G8B8` encoding.
    Palettized,
}

/// Test name to test case mapping, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestRegistry {
    tests: BTreeMap<String, TestCase>,
}

impl TestRegistry {
    /// Registers a direct-volume test for every swizzled encoding in `catalog` except the
    /// palettized one, which gets the palettized test under its own name instead.
    ///
    /// Linear encodings are skipped: the hardware cannot sample them as volumes.
    pub fn for_catalog(catalog: &'static [FormatDescriptor]) -> Self {
        let mut tests = BTreeMap::new();
        for format in catalog.iter().filter(|f| f.is_tiled_volume_capable) {
            let case = if format.is_palettized() {
                TestCase::Palettized
            } else {
                TestCase::DirectVolume(format)
            };
            tests.insert(format.name.to_string(), case);
        }
        Self { tests }
    }

    pub fn get(&self, name: &str) -> Option<TestCase> {
        self.tests.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.tests.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TestCase)> + '_ {
        self.tests.iter().map(|(name, case)| (name.as_str(), *case))
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use texprobe_formats::{encoding, TEXTURE_FORMATS};

    use super::*;

    #[test]
    fn registry_covers_swizzled_formats() {
        let registry = TestRegistry::for_catalog(TEXTURE_FORMATS);
        let swizzled = TEXTURE_FORMATS
            .iter()
            .filter(|f| f.is_tiled_volume_capable)
            .count();
        assert_eq!(registry.len(), swizzled);

        for (name, case) in registry.iter() {
            match case {
                TestCase::DirectVolume(format) => {
                    assert_eq!(format.name, name);
                    assert!(format.is_tiled_volume_capable);
                    assert!(!format.is_palettized());
                }
                TestCase::Palettized => assert_eq!(name, "SZ_I8_A8R8G8B8"),
            }
        }
        assert!(registry.get("LU_IMAGE_A8R8G8B8").is_none());
        assert_eq!(registry.get("SZ_I8_A8R8G8B8"), Some(TestCase::Palettized));
    }

    #[test]
    fn entries_come_from_the_given_catalog() {
        static ONLY_LINEAR: &[FormatDescriptor] = &[FormatDescriptor {
            name: "LU_IMAGE_Y8",
            encoding_id: encoding::LU_IMAGE_Y8,
            is_tiled_volume_capable: false,
            requires_conversion: true,
        }];
        assert!(TestRegistry::for_catalog(ONLY_LINEAR).is_empty());

        static SWIZZLED_PAIR: &[FormatDescriptor] = &[
            FormatDescriptor {
                name: "SZ_Y8",
                encoding_id: encoding::SZ_Y8,
                is_tiled_volume_capable: true,
                requires_conversion: true,
            },
            FormatDescriptor {
                name: "SZ_I8_A8R8G8B8",
                encoding_id: encoding::SZ_I8_A8R8G8B8,
                is_tiled_volume_capable: true,
                requires_conversion: true,
            },
        ];
        let registry = TestRegistry::for_catalog(SWIZZLED_PAIR);
        assert_eq!(
            registry.iter().collect::<Vec<_>>(),
            [
                ("SZ_I8_A8R8G8B8", TestCase::Palettized),
                ("SZ_Y8", TestCase::DirectVolume(&SWIZZLED_PAIR[0])),
            ]
        );
    }

    #[test]
    fn names_are_sorted() {
        let registry = TestRegistry::for_catalog(TEXTURE_FORMATS);
        let names: Vec<_> = registry.names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }
}
