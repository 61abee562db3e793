mod media_test;
