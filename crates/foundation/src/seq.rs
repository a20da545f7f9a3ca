/// Monotonically increasing cycle sequence number.
///
/// Each click-to-analyze cycle is issued one of these; a response is applied
/// only if its sequence still matches the latest issued one, so a newer click
/// supersedes any in-flight cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CycleSeq(pub u64);

impl CycleSeq {
    /// Sentinel for "no cycle issued yet".
    pub const NONE: CycleSeq = CycleSeq(0);

    pub fn next(self) -> CycleSeq {
        CycleSeq(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for CycleSeq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::CycleSeq;

    #[test]
    fn next_is_strictly_increasing() {
        let a = CycleSeq::NONE.next();
        let b = a.next();
        assert!(CycleSeq::NONE < a);
        assert!(a < b);
    }
}
