mod daily_cycle_test;
