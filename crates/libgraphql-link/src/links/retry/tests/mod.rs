mod retry_link_tests;
