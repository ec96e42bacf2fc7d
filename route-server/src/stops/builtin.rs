//! Built-in stop set.

use crate::domain::{Coordinate, Stop};

use super::registry::StopRegistry;

/// (id, name, lat, lng, order)
const KIGALI_LOOP: [(u32, &str, f64, f64, u32); 7] = [
    (1, "Stop B", -1.939826787816454, 30.0445426438232, 1),
    (2, "Stop C", -1.9355377074007851, 30.060163829002217, 2),
    (3, "Stop D", -1.9358808342336546, 30.08024820994666, 3),
    (4, "Stop E", -1.9489196023037583, 30.092607828989397, 4),
    (5, "Stop F", -1.9592132952818164, 30.106684061788073, 5),
    (6, "Stop G", -1.9487480402200394, 30.126596781356923, 6),
    (7, "Stop H", -1.9365670876910166, 30.13020167024439, 7),
];

/// The seven-stop route through Kigali used when no stops file is
/// configured.
pub fn kigali_loop() -> StopRegistry {
    let stops = KIGALI_LOOP
        .iter()
        .map(|&(id, name, lat, lng, order)| {
            let position =
                Coordinate::new(lat, lng).expect("built-in stop coordinates are valid");
            Stop::new(id, name, position, order)
        })
        .collect();

    StopRegistry::new(stops).expect("built-in stops are well formed")
}
