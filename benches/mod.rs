use criterion::criterion_main;


criterion_main!(pricing::benches, calibration::benches);
