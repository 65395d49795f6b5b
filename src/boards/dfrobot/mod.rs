pub mod firebeetle_esp32_p4_lcd_4_3;
