mod calibration_tests;
mod lattice_tests;
mod pricing_properties;
mod solver_tests;
