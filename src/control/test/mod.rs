mod fade_test;
