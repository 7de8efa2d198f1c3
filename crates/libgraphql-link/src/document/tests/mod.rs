mod client_fields_tests;
