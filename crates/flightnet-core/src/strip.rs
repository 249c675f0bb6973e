use crate::matcher::CycleMatch;

/// Remove the anchors of `cycle` from `trace`.
///
/// Text before and after the match and every filler segment inside it are
/// kept in their original order.
pub fn strip(trace: &str, cycle: &CycleMatch) -> String {
    let mut out = String::with_capacity(trace.len());
    let mut pos = 0;
    for hit in &cycle.anchors {
        out.push_str(&trace[pos..hit.start]);
        pos = hit.end();
    }
    out.push_str(&trace[pos..]);
    out
}

/// Reinsert the anchors of `cycle` into the filler it left behind.
///
/// `fillers` are the per-anchor segments from [`CycleMatch::fillers`];
/// the result is the matched span.
pub fn restore_span(cycle: &CycleMatch, fillers: &[&str]) -> String {
    let mut out = String::new();
    for (hit, filler) in cycle.anchors.iter().zip(fillers) {
        out.push_str(hit.token.literal());
        out.push_str(filler);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::CycleMatcher;
    use flightnet_ir::grammar::CycleGrammar;

    #[test]
    fn test_strip_keeps_filler_and_surroundings() {
        let grammar = CycleGrammar::flight_booking();
        let trace = "<T0a T1b T3 T4 T7c T8 T11>";
        let m = CycleMatcher::new(&grammar).find(trace).unwrap();
        assert_eq!(strip(trace, &m), "<a b   c  >");
    }

    #[test]
    fn test_strip_exact_cycle_is_empty() {
        let grammar = CycleGrammar::flight_booking();
        let trace = "T0T1T2T5T6T9T10T11";
        let m = CycleMatcher::new(&grammar).find(trace).unwrap();
        assert_eq!(strip(trace, &m), "");
    }

    #[test]
    fn test_restore_span() {
        let grammar = CycleGrammar::flight_booking();
        let trace = "zzT0-T1--T2T5.T6T9T10:T11zz";
        let m = CycleMatcher::new(&grammar).find(trace).unwrap();
        let fillers = m.fillers(trace);
        assert_eq!(restore_span(&m, &fillers), &trace[m.start..m.end]);
    }
}
