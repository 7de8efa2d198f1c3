mod persisted_query_link_tests;
