mod entity_data_tests;
mod module_tests;
