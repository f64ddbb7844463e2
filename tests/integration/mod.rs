mod rest_tests;
