//! Asset-pool sweep helpers.
//!
//! Out-of-scope driver code walks each fixed-size pool record array and
//! calls into this module for two checks before handing a record to the
//! animation or model decoder: whether the record is a live free-list link
//! rather than a real asset ([`is_pool_internal_pointer`]), and whether a
//! live record is a "void" placeholder the engine substitutes for an asset
//! that failed to load ([`is_placeholder_animation`], [`is_placeholder_model`]).

/// Returns `true` when `name_ptr` looks like a free-list link inside the
/// pool's own backing array rather than a real name pointer: zero, or
/// strictly between the pool's start offset and `start + count * record_size`.
///
/// Different pools compare a different field against these bounds in the
/// original game (the name pointer for animations/models/sounds, the
/// free-head pointer for images); callers pass whichever field is the
/// bounds-checked one for their pool and `name_ptr == 0` separately when
/// that differs, matching the asymmetry in the source this is grounded on.
#[must_use]
pub fn is_pool_internal_pointer(bounds_ptr: u64, name_ptr: u64, start: u64, count: u32, record_size: u64) -> bool {
    let max = start + u64::from(count) * record_size;
    (bounds_ptr > start && bounds_ptr < max) || name_ptr == 0
}

/// The pointer set compared field-by-field to classify an animation record
/// as the cached "void" placeholder. Order matches the source's comparison,
/// not struct layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimPlaceholderFields {
    /// Bone ID table pointer
    pub bone_ids: u64,
    /// Byte-keyed data table pointer
    pub data_bytes: u64,
    /// Short-keyed data table pointer
    pub data_shorts: u64,
    /// Int-keyed data table pointer
    pub data_ints: u64,
    /// Byte-keyed random-data table pointer
    pub random_data_bytes: u64,
    /// Int-keyed random-data table pointer
    pub random_data_ints: u64,
    /// Short-keyed random-data table pointer
    pub random_data_shorts: u64,
    /// Notification table pointer
    pub notifications: u64,
    /// Delta-parts table pointer
    pub delta_parts: u64,
}

/// The pointer/count set compared field-by-field to classify a model
/// record as the cached "void" placeholder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelPlaceholderFields {
    /// Bone ID table pointer
    pub bone_ids: u64,
    /// Bone parent-index table pointer
    pub parent_list: u64,
    /// Local rotation table pointer
    pub rotations: u64,
    /// Local translation table pointer
    pub translations: u64,
    /// Cosmetic/regular bone classification table pointer
    pub part_classification: u64,
    /// Base matrix table pointer
    pub base_matrices: u64,
    /// LOD count
    pub num_lods: u32,
    /// Material handle table pointer
    pub material_handles: u64,
    /// Bone count
    pub num_bones: u32,
}

/// `true` when `candidate` matches `placeholder` field-for-field: the
/// fingerprint the original uses instead of a name comparison, since by the
/// time this check runs the "void" name has already been consumed to seed
/// `placeholder` and will never equal `candidate`'s own name again.
#[must_use]
pub fn is_placeholder_animation(candidate: &AnimPlaceholderFields, placeholder: &AnimPlaceholderFields) -> bool {
    candidate == placeholder
}

/// `true` when `candidate` matches `placeholder` field-for-field.
#[must_use]
pub fn is_placeholder_model(candidate: &ModelPlaceholderFields, placeholder: &ModelPlaceholderFields) -> bool {
    candidate == placeholder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_name_pointer_is_internal() {
        assert!(is_pool_internal_pointer(0x5000, 0, 0x1000, 10, 0x40));
    }

    #[test]
    fn pointer_within_pool_bounds_is_internal() {
        // start=0x1000, count=10, record_size=0x40 -> max = 0x1400
        assert!(is_pool_internal_pointer(0x1200, 0x1200, 0x1000, 10, 0x40));
    }

    #[test]
    fn pointer_outside_pool_bounds_is_not_internal() {
        assert!(!is_pool_internal_pointer(0x9000, 0x9000, 0x1000, 10, 0x40));
    }

    #[test]
    fn default_placeholder_fields_match_a_zeroed_record() {
        let placeholder = AnimPlaceholderFields::default();
        let zeroed = AnimPlaceholderFields::default();
        assert!(is_placeholder_animation(&zeroed, &placeholder));
    }

    #[test]
    fn differing_field_breaks_the_match() {
        let placeholder = AnimPlaceholderFields {
            bone_ids: 0x2000,
            ..Default::default()
        };
        let mut candidate = placeholder;
        candidate.data_bytes = 0x3000;
        assert!(!is_placeholder_animation(&candidate, &placeholder));
    }

    #[test]
    fn model_placeholder_compares_counts_too() {
        let placeholder = ModelPlaceholderFields {
            num_bones: 40,
            ..Default::default()
        };
        let mut candidate = placeholder;
        candidate.num_bones = 41;
        assert!(!is_placeholder_model(&candidate, &placeholder));
    }
}
