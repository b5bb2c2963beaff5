//! Static lists offered by the selection wizard's pickers.

/// Programs a student can pick at the first step.
pub const PROGRAMS: [&str; 13] = [
    "Architectural Engineering",
    "Biomedical Engineering",
    "Chemical Engineering",
    "Civil Engineering",
    "Computer Engineering",
    "Electrical Engineering",
    "Environmental Engineering",
    "Geological Engineering",
    "Management Engineering",
    "Mechanical Engineering",
    "Mechatronics Engineering",
    "Software Engineering",
    "Systems Design Engineering",
];

/// Academic terms in study order.
pub const ACADEMIC_TERMS: [&str; 8] = ["1A", "1B", "2A", "2B", "3A", "3B", "4A", "4B"];

/// Optional minors offered at the third step.
pub const MINORS: [&str; 8] = [
    "Artificial Intelligence",
    "Biomechanics",
    "Computing",
    "Economics",
    "Entrepreneurship",
    "Management Sciences",
    "Mechatronics",
    "Physics",
];

/// Case-insensitive lookup returning the catalog spelling of a program.
pub fn canonical_program(name: &str) -> Option<&'static str> {
    let name = name.trim();
    PROGRAMS
        .iter()
        .copied()
        .find(|program| program.eq_ignore_ascii_case(name))
}

/// 1-based position of a term in study order (`1A` → 1, `4B` → 8).
pub fn term_rank(term: &str) -> Option<u8> {
    ACADEMIC_TERMS
        .iter()
        .position(|candidate| *candidate == term.trim())
        .and_then(|index| u8::try_from(index + 1).ok())
}
