pub mod dijkstra_data;
